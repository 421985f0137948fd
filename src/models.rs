use diesel::prelude::*;
use std::fmt;

use super::schema::users;

/// One row of the `users` table. Rows are written elsewhere; this crate only reads them.
#[derive(Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
}

// Keep the stored credential out of logs and panic messages.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
