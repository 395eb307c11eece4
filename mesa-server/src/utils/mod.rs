//! Utilities - shared error types, logging, time and validation helpers
//!
//! - [`AppError`] - application error (from shared::error)
//! - [`ApiResponse`] - response envelope (from shared::error)

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
