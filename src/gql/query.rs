use super::{Context, CredentialPolicy, ResolveError};
use crate::models;
use juniper::graphql_object;

#[allow(clippy::module_name_repetitions)]
pub struct RootQuery;

/// Arguments of the `user` field. Empty strings are ordinary lookup values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryArguments {
    pub username: String,
    pub email: String,
}

/// Looks up the user named by `args` through the store carried in `context`.
///
/// # Errors
///
/// Will return Err if the context has no store or the store lookup fails
pub fn resolve_user(
    args: &QueryArguments,
    context: &Context,
) -> Result<Option<models::UserRecord>, ResolveError> {
    let store = context.store().ok_or_else(|| {
        let err = ResolveError::MissingStore;
        log::error!("{} ({})", err, err.code());
        err
    })?;

    log::debug!(
        "Looking up user username={:?} email={:?}",
        &args.username,
        &args.email
    );
    match store.find_user_by_username_or_email(&args.username, &args.email) {
        Ok(Some(user)) => {
            log::debug!("Found user {}", user.id);
            Ok(Some(user))
        }
        Ok(None) => {
            log::debug!("No user matches");
            Ok(None)
        }
        Err(err) => {
            log::warn!("User lookup failed: {}", err);
            Err(err.into())
        }
    }
}

#[graphql_object(context = Context)]
impl RootQuery {
    /// Find the first user whose username or email matches
    fn user(
        context: &Context,
        username: String,
        email: String,
    ) -> Result<Option<models::UserRecord>, ResolveError> {
        resolve_user(&QueryArguments { username, email }, context)
    }
}

#[graphql_object(
    name = "User",
    description = "A registered user",
    context = Context,
)]
impl models::UserRecord {
    fn id(&self) -> i32 {
        self.id
    }
    fn username(&self) -> &str {
        &self.username
    }
    fn email(&self) -> &str {
        &self.email
    }
    /// Stored credential, or null unless the server is configured to expose it
    fn password(&self, context: &Context) -> Option<&str> {
        match context.credentials() {
            CredentialPolicy::Expose => Some(&self.password),
            CredentialPolicy::Redact => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockUserStore, StoreError};
    use std::sync::Arc;

    fn alice() -> models::UserRecord {
        models::UserRecord {
            id: 1,
            username: "alice".into(),
            email: "a@x.com".into(),
            password: "p1".into(),
        }
    }

    fn args(username: &str, email: &str) -> QueryArguments {
        QueryArguments {
            username: username.into(),
            email: email.into(),
        }
    }

    #[test]
    fn passes_both_arguments_to_the_store() {
        let mut store = MockUserStore::new();
        store
            .expect_find_user_by_username_or_email()
            .times(1)
            .returning(|username, email| {
                assert_eq!(username, "alice");
                assert_eq!(email, "");
                Ok(Some(alice()))
            });
        let context = Context::new(Arc::new(store));

        let user = resolve_user(&args("alice", ""), &context).unwrap();
        assert_eq!(user, Some(alice()));
    }

    #[test]
    fn not_found_is_none() {
        let mut store = MockUserStore::new();
        store
            .expect_find_user_by_username_or_email()
            .returning(|_, _| Ok(None));
        let context = Context::new(Arc::new(store));

        assert_eq!(resolve_user(&args("bob", ""), &context).unwrap(), None);
    }

    #[test]
    fn store_failure_is_propagated() {
        let mut store = MockUserStore::new();
        store
            .expect_find_user_by_username_or_email()
            .returning(|_, _| Err(StoreError::Query(diesel::result::Error::BrokenTransactionManager)));
        let context = Context::new(Arc::new(store));

        let err = resolve_user(&args("bob", ""), &context).unwrap_err();
        assert!(matches!(err, ResolveError::Store(StoreError::Query(_))));
        assert_eq!(err.code(), "STORE_ERROR");
    }

    #[test]
    fn missing_store_is_a_configuration_error() {
        let err = resolve_user(&args("alice", ""), &Context::without_store()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingStore));
        assert_eq!(err.code(), "INTERNAL_CONFIGURATION_ERROR");
    }
}
