//! Read access to the `users` table.

use diesel::prelude::*;

use crate::db::SqlitePool;
use crate::models::UserRecord;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No connection could be checked out of the pool.
    #[error("user store unavailable: {0}")]
    Unavailable(#[from] r2d2::Error),
    #[error("user query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// The single lookup the GraphQL layer needs from storage.
///
/// Implementations are shared across request threads and must not hold locks across the query.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UserStore: Send + Sync {
    /// Returns the first user whose username or email matches, lowest id first.
    /// `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Will return Err when the store cannot be reached or the query fails
    fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError>;
}

pub struct DieselUserStore {
    pool: SqlitePool,
}

impl DieselUserStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserStore for DieselUserStore {
    fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        use crate::schema::users::dsl;

        let mut conn = self.pool.get()?;
        let user = dsl::users
            .filter(dsl::username.eq(username).or(dsl::email.eq(email)))
            .order(dsl::id.asc())
            .select(UserRecord::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user)
    }
}
