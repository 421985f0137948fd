pub mod db;
pub mod gql;
pub mod models;
pub mod schema;
pub mod store;
