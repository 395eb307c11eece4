//! Unified error codes for the reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Table errors
//! - 3xxx: Reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire so clients can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 1001,
    /// A customer with this email already exists
    CustomerAlreadyExists = 1002,
    /// Customer still holds pending/confirmed reservations
    CustomerHasActiveReservations = 1003,

    // ==================== 2xxx: Table ====================
    /// Table not found (or inactive)
    TableNotFound = 2001,
    /// A table with this number already exists
    TableAlreadyExists = 2002,
    /// Table still has pending/confirmed reservations
    TableHasActiveReservations = 2003,

    // ==================== 3xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 3001,
    /// Party size exceeds table capacity
    CapacityExceeded = 3002,
    /// Another active reservation holds the table in that window
    OverlappingReservation = 3003,
    /// Start time is not in the future
    OutOfSchedule = 3004,
    /// Reservation can no longer be cancelled
    CancellationNotAllowed = 3005,
    /// Lifecycle transition is not allowed from the current status
    InvalidStateTransition = 3006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerAlreadyExists => "A customer with this email already exists",
            ErrorCode::CustomerHasActiveReservations => "Customer has active reservations",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableAlreadyExists => "A table with this number already exists",
            ErrorCode::TableHasActiveReservations => "Table has active reservations",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::CapacityExceeded => "Party size exceeds table capacity",
            ErrorCode::OverlappingReservation => {
                "The table is already reserved in that time window"
            }
            ErrorCode::OutOfSchedule => "Reservation start must be in the future",
            ErrorCode::CancellationNotAllowed => "Reservation cannot be cancelled",
            ErrorCode::InvalidStateTransition => "Reservation status transition not allowed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Customer
            1001 => Ok(ErrorCode::CustomerNotFound),
            1002 => Ok(ErrorCode::CustomerAlreadyExists),
            1003 => Ok(ErrorCode::CustomerHasActiveReservations),

            // Table
            2001 => Ok(ErrorCode::TableNotFound),
            2002 => Ok(ErrorCode::TableAlreadyExists),
            2003 => Ok(ErrorCode::TableHasActiveReservations),

            // Reservation
            3001 => Ok(ErrorCode::ReservationNotFound),
            3002 => Ok(ErrorCode::CapacityExceeded),
            3003 => Ok(ErrorCode::OverlappingReservation),
            3004 => Ok(ErrorCode::OutOfSchedule),
            3005 => Ok(ErrorCode::CancellationNotAllowed),
            3006 => Ok(ErrorCode::InvalidStateTransition),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::CustomerNotFound.code(), 1001);
        assert_eq!(ErrorCode::CustomerAlreadyExists.code(), 1002);
        assert_eq!(ErrorCode::TableNotFound.code(), 2001);
        assert_eq!(ErrorCode::TableAlreadyExists.code(), 2002);
        assert_eq!(ErrorCode::ReservationNotFound.code(), 3001);
        assert_eq!(ErrorCode::CapacityExceeded.code(), 3002);
        assert_eq!(ErrorCode::OverlappingReservation.code(), 3003);
        assert_eq!(ErrorCode::OutOfSchedule.code(), 3004);
        assert_eq!(ErrorCode::CancellationNotAllowed.code(), 3005);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::OverlappingReservation.is_success());
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::CustomerNotFound,
            ErrorCode::CustomerAlreadyExists,
            ErrorCode::CustomerHasActiveReservations,
            ErrorCode::TableNotFound,
            ErrorCode::TableAlreadyExists,
            ErrorCode::TableHasActiveReservations,
            ErrorCode::ReservationNotFound,
            ErrorCode::CapacityExceeded,
            ErrorCode::OverlappingReservation,
            ErrorCode::OutOfSchedule,
            ErrorCode::CancellationNotAllowed,
            ErrorCode::InvalidStateTransition,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::OverlappingReservation).unwrap();
        assert_eq!(json, "3003");
        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::CustomerAlreadyExists);
        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }
}
