use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Shared application state
///
/// Cheap to clone: the pool is reference counted and the config is small.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool (migrations applied) |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Create the work directory, open the database and run migrations
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            ServerError::Config(format!(
                "Failed to create work dir {}: {}",
                config.work_dir, e
            ))
        })?;

        let db = DbService::new(&config.database_path).await?;
        tracing::info!(path = %config.database_path, "Database ready");

        Ok(Self::new(config.clone(), db.pool))
    }

    /// Business timezone for calendar-day math
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }
}
