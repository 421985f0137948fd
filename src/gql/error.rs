use juniper::{graphql_value, FieldError, IntoFieldError, ScalarValue};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The execution context was built without a user store.
    #[error("internal configuration error: no user store in execution context")]
    MissingStore,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingStore => "INTERNAL_CONFIGURATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl<S: ScalarValue> IntoFieldError<S> for ResolveError {
    fn into_field_error(self) -> FieldError<S> {
        let extensions = match self {
            Self::MissingStore => graphql_value!({ "code": "INTERNAL_CONFIGURATION_ERROR" }),
            Self::Store(_) => graphql_value!({ "code": "STORE_ERROR" }),
        };
        FieldError::new(self, extensions)
    }
}
