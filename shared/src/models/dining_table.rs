//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat counts a table may be configured with
pub const TABLE_CAPACITIES: [i32; 4] = [2, 4, 6, 8];

/// Smallest table number
pub const MIN_TABLE_NUMBER: i32 = 1;

/// Largest table number
pub const MAX_TABLE_NUMBER: i32 = 99;

/// Where the table sits in the restaurant
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TableLocation {
    #[default]
    Interior,
    Terraza,
    Privado,
}

impl TableLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Terraza => "terraza",
            Self::Privado => "privado",
        }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity (mesa)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub number: i32,
    pub capacity: i32,
    pub location: TableLocation,
    pub is_active: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub number: i32,
    pub capacity: i32,
    #[serde(default)]
    pub location: TableLocation,
    pub is_active: Option<bool>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub number: Option<i32>,
    pub capacity: Option<i32>,
    pub location: Option<TableLocation>,
    pub is_active: Option<bool>,
}

/// Availability lookup (`/mesas/disponibles/?numero=&fecha_hora=`)
///
/// `at` is a Unix millisecond instant.
#[derive(Debug, Clone, Deserialize)]
pub struct TableAvailabilityQuery {
    #[serde(alias = "numero")]
    pub number: i32,
    #[serde(alias = "fecha_hora")]
    pub at: i64,
}
