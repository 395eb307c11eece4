//! Mesa Server - restaurant reservation service
//!
//! # Architecture
//!
//! - **Reservations** (`reservations`): booking rules, 2-hour windows,
//!   lifecycle guards
//! - **Database** (`db`): SQLite via sqlx, migrations and repositories
//! - **HTTP API** (`api`): customers, tables, reservations and statistics
//!
//! # Module layout
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # config, state, errors, server
//! ├── api/           # HTTP handlers
//! ├── routes/        # router assembly and middleware
//! ├── reservations/  # booking engine
//! ├── db/            # database layer
//! └── utils/         # logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reservations;
pub mod routes;
pub mod utils;

pub use core::{Config, Server, ServerError, ServerState};
pub use routes::{build_app, build_router};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging from `LOG_LEVEL` / `LOG_DIR` / `LOG_JSON`
pub fn setup_environment() {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    let json = std::env::var("LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  _________ _
  / /|_/ / _ \/ ___/ __ `/
 / /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
