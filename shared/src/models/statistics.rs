//! Statistics Models

use serde::{Deserialize, Serialize};

/// Occupancy of a single business day (cancelled reservations excluded)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyOccupancy {
    /// `YYYY-MM-DD`
    pub date: String,
    pub reservations: i64,
    /// Sum of party sizes
    pub covers: i64,
}

/// Seven consecutive days starting at `start_date`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyOccupancy {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DailyOccupancy>,
    pub total_reservations: i64,
}

/// Customer ranked by reservation count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FrequentCustomer {
    pub customer_id: i64,
    /// None when the customer has since been deleted
    pub customer_name: Option<String>,
    pub reservations: i64,
}

/// Table ranked by reservation count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PopularTable {
    pub table_id: i64,
    pub table_number: Option<i32>,
    pub reservations: i64,
}

/// Reservation counts by status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationSummary {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// `?fecha=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct DailyOccupancyQuery {
    #[serde(alias = "fecha")]
    pub date: String,
}

/// `?fecha_inicio=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyOccupancyQuery {
    #[serde(alias = "fecha_inicio")]
    pub start_date: String,
}
