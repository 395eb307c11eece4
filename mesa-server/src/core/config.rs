use chrono_tz::Tz;
use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/mesa.db | SQLite file |
/// | HTTP_PORT | 8000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | BUSINESS_TIMEZONE | Europe/Madrid | IANA zone used for calendar days |
/// | LOG_LEVEL | info | max tracing level |
/// | LOG_DIR | (unset) | daily rolling log files when set |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
///
/// ```ignore
/// WORK_DIR=/srv/mesa HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory
    pub work_dir: String,
    /// SQLite database file
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Timezone for day boundaries in filters and statistics
    pub timezone: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("mesa.db")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: parse_timezone(
                &std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "Europe/Madrid".into()),
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            work_dir,
        }
    }

    /// Configuration for tests: no files touched, fixed timezone
    pub fn for_tests() -> Self {
        Self {
            work_dir: ".".into(),
            database_path: ":memory:".into(),
            http_port: 0,
            environment: "test".into(),
            timezone: chrono_tz::Europe::Madrid,
            log_level: "warn".into(),
            log_dir: None,
            request_timeout_ms: 30000,
        }
    }

    /// Production environment?
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Development environment?
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parse an IANA timezone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!("Unknown BUSINESS_TIMEZONE '{}', falling back to UTC", name);
        Tz::UTC
    })
}
