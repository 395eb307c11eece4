//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CustomerNotFound
            | Self::TableNotFound
            | Self::ReservationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::CustomerAlreadyExists
            | Self::CustomerHasActiveReservations
            | Self::TableAlreadyExists
            | Self::TableHasActiveReservations
            | Self::OverlappingReservation
            | Self::CancellationNotAllowed
            | Self::InvalidStateTransition => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (well-formed but violates a business rule)
            Self::CapacityExceeded | Self::OutOfSchedule => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange => StatusCode::BAD_REQUEST,
        }
    }
}
