use diesel::prelude::*;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use userlookup::db::{self, PoolSettings};
use userlookup::gql::{self, Context, CredentialPolicy, QueryResponse, Schema};
use userlookup::store::{DieselUserStore, UserStore};

pub struct Fixture {
    // Held so the database file outlives the pool.
    _dir: TempDir,
    pub schema: Schema,
    pub store: Arc<dyn UserStore>,
}

impl Fixture {
    /// A database file with a `users` table holding `rows`, each `(id, username, email, password)`.
    pub fn with_users(rows: &[(i32, &str, &str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.sqlite");
        let database_url = path.to_str().unwrap().to_owned();

        let mut conn = SqliteConnection::establish(&database_url).unwrap();
        sql_query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                username TEXT NOT NULL,
                email TEXT NOT NULL,
                password TEXT NOT NULL
            )",
        )
        .execute(&mut conn)
        .unwrap();
        for &(id, username, email, password) in rows {
            use userlookup::schema::users::dsl;
            diesel::insert_into(dsl::users)
                .values((
                    dsl::id.eq(id),
                    dsl::username.eq(username),
                    dsl::email.eq(email),
                    dsl::password.eq(password),
                ))
                .execute(&mut conn)
                .unwrap();
        }

        let pool = db::create_pool(&PoolSettings {
            database_url,
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
        })
        .unwrap();
        Fixture {
            _dir: dir,
            schema: gql::schema(),
            store: Arc::new(DieselUserStore::new(pool)),
        }
    }

    pub fn empty() -> Self {
        Self::with_users(&[])
    }

    pub fn context(&self) -> Context {
        Context::new(self.store.clone()).with_credentials(CredentialPolicy::Expose)
    }

    pub fn query(&self, document: &str) -> QueryResponse {
        run(&self.schema, document, &self.context())
    }
}

/// A store whose database lives in a directory that does not exist.
pub fn unreachable_store() -> Arc<dyn UserStore> {
    let pool = db::create_lazy_pool(&PoolSettings {
        database_url: "/nonexistent/userlookup/users.sqlite".into(),
        max_size: 1,
        connection_timeout: Duration::from_millis(250),
    });
    Arc::new(DieselUserStore::new(pool))
}

pub fn run(schema: &Schema, document: &str, context: &Context) -> QueryResponse {
    let request = juniper::http::GraphQLRequest::new(document.to_owned(), None, None);
    gql::execute(schema, &request, context).unwrap()
}
