//! Repository Module
//!
//! Free async functions over `&SqlitePool` (or any SQLite executor when the
//! caller runs inside a transaction). No business rules live here.

pub mod customer;
pub mod dining_table;
pub mod reservation;
pub mod statistics;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Message raised by the reservation overlap triggers
pub const OVERLAP_ABORT: &str = "reservation overlaps";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Reservation overlaps an active reservation")]
    Overlap,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.message().contains(OVERLAP_ABORT) {
                return RepoError::Overlap;
            }
            if db_err.is_check_violation() {
                return RepoError::Validation(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Overlap => AppError::new(ErrorCode::OverlappingReservation),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
