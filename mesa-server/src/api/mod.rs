//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - banner, version and health probe
//! - [`customers`] - customer registry (`/clientes`)
//! - [`tables`] - table registry (`/mesas`)
//! - [`reservations`] - reservation engine (`/reservas`)
//! - [`statistics`] - read-only reports (`/estadisticas`)

pub mod customers;
pub mod health;
pub mod reservations;
pub mod statistics;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
