use juniper::{EmptyMutation, EmptySubscription};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub mod error;
pub mod query;
pub mod response;

pub use error::ResolveError;
pub use response::{execute, QueryResponse};

use crate::gql::query::RootQuery;
use crate::store::UserStore;

/// Whether the `password` field of `User` returns the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    #[default]
    Redact,
    Expose,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown credential policy {0:?}, expected \"redact\" or \"expose\"")]
pub struct UnknownCredentialPolicy(String);

impl FromStr for CredentialPolicy {
    type Err = UnknownCredentialPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redact" => Ok(Self::Redact),
            "expose" => Ok(Self::Expose),
            _ => Err(UnknownCredentialPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for CredentialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Redact => "redact",
            Self::Expose => "expose",
        })
    }
}

/// Per-request execution context. Build one for every request; the store inside is shared.
#[derive(Clone, Default)]
pub struct Context {
    store: Option<Arc<dyn UserStore>>,
    credentials: CredentialPolicy,
}

impl Context {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store: Some(store),
            credentials: CredentialPolicy::default(),
        }
    }

    /// A context carrying no store. Every lookup through it fails with
    /// [`ResolveError::MissingStore`].
    #[must_use]
    pub fn without_store() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialPolicy) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn store(&self) -> Option<&dyn UserStore> {
        self.store.as_deref()
    }

    #[must_use]
    pub fn credentials(&self) -> CredentialPolicy {
        self.credentials
    }
}

impl juniper::Context for Context {}

// Queries only: no mutations or subscriptions are exposed.
pub type Schema =
    juniper::RootNode<'static, RootQuery, EmptyMutation<Context>, EmptySubscription<Context>>;

/// Builds the schema. Call once at startup and share the result.
#[must_use]
pub fn schema() -> Schema {
    Schema::new(RootQuery, EmptyMutation::new(), EmptySubscription::new())
}
