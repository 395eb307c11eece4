//! Reservation Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation lifecycle status
///
/// `pendiente → confirmada → completada`, and `pendiente | confirmada →
/// cancelada`. Completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReservationStatus {
    #[default]
    #[serde(rename = "pendiente")]
    #[cfg_attr(feature = "db", sqlx(rename = "pendiente"))]
    Pending,
    #[serde(rename = "confirmada")]
    #[cfg_attr(feature = "db", sqlx(rename = "confirmada"))]
    Confirmed,
    #[serde(rename = "completada")]
    #[cfg_attr(feature = "db", sqlx(rename = "completada"))]
    Completed,
    #[serde(rename = "cancelada")]
    #[cfg_attr(feature = "db", sqlx(rename = "cancelada"))]
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Confirmed => "confirmada",
            Self::Completed => "completada",
            Self::Cancelled => "cancelada",
        }
    }

    /// Whether the reservation still blocks its table window
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Allowed lifecycle moves. Staying in the same status is not a move.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (*self, next),
            (Pending, Confirmed | Cancelled) | (Confirmed, Completed | Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity (reserva)
///
/// `start_at`/`end_at` are Unix milliseconds; `end_at` is always
/// `start_at` plus the fixed reservation duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub table_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub party_size: i32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_id: i64,
    pub table_id: i64,
    pub start_at: i64,
    pub party_size: i32,
    #[serde(default)]
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

/// Update reservation payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub customer_id: Option<i64>,
    pub table_id: Option<i64>,
    pub start_at: Option<i64>,
    pub party_size: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub notes: Option<String>,
}

/// List filters; Spanish parameter names are accepted as aliases
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationFilter {
    /// Business-day date, `YYYY-MM-DD`
    #[serde(alias = "fecha")]
    pub date: Option<String>,
    #[serde(alias = "cliente_id")]
    pub customer_id: Option<i64>,
    #[serde(alias = "mesa_id")]
    pub table_id: Option<i64>,
    #[serde(alias = "estado")]
    pub status: Option<ReservationStatus>,
}
