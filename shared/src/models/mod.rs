//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); all instants are Unix
//! milliseconds.

pub mod customer;
pub mod dining_table;
pub mod reservation;
pub mod statistics;

// Re-exports
pub use customer::*;
pub use dining_table::*;
pub use reservation::*;
pub use statistics::*;
