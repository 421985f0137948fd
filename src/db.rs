use diesel::r2d2::ConnectionManager;
use diesel::sqlite::SqliteConnection;
use std::time::Duration;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum PoolSettingsError {
    #[error("invalid database configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database_pool_size must be at least 1")]
    EmptyPool,
    #[error("database_connection_timeout must be at least 1 second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub database_url: String,
    pub max_size: u32,
    pub connection_timeout: Duration,
}

impl PoolSettings {
    /// # Errors
    ///
    /// Will return Err if a database key is missing or out of range
    pub fn from_config(config: &config::Config) -> Result<Self, PoolSettingsError> {
        let max_size = config.get::<u32>("database_pool_size")?;
        if max_size == 0 {
            return Err(PoolSettingsError::EmptyPool);
        }
        let timeout_secs = config.get::<u64>("database_connection_timeout")?;
        if timeout_secs == 0 {
            return Err(PoolSettingsError::ZeroTimeout);
        }
        Ok(Self {
            database_url: config.get_string("database_url")?,
            max_size,
            connection_timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn builder(&self) -> r2d2::Builder<ConnectionManager<SqliteConnection>> {
        r2d2::Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
    }

    fn manager(&self) -> ConnectionManager<SqliteConnection> {
        ConnectionManager::<SqliteConnection>::new(&self.database_url)
    }
}

/// Builds a pool and waits for its first connections.
///
/// # Errors
///
/// Will return Err for any problem in connection to database
pub fn create_pool(settings: &PoolSettings) -> Result<SqlitePool, r2d2::Error> {
    log::debug!("Connecting to {}", &settings.database_url);
    settings.builder().build(settings.manager())
}

/// Builds a pool without connecting. Connection failures show up on checkout instead.
#[must_use]
pub fn create_lazy_pool(settings: &PoolSettings) -> SqlitePool {
    settings.builder().build_unchecked(settings.manager())
}
