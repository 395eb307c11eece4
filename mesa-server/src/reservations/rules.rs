//! Booking rules over typed records
//!
//! Pure checks; the service feeds them rows read inside its transaction.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Customer, DiningTable, Reservation, ReservationStatus};

use super::schedule::end_for;

pub fn require_customer(customer: Option<Customer>, customer_id: i64) -> AppResult<Customer> {
    customer.ok_or_else(|| AppError::customer_not_found(customer_id))
}

/// Table must exist and be active
pub fn require_bookable_table(table: Option<DiningTable>, table_id: i64) -> AppResult<DiningTable> {
    match table {
        None => Err(AppError::table_not_found(table_id)),
        Some(t) if !t.is_active => Err(AppError::with_message(
            ErrorCode::TableNotFound,
            format!("Table {} is not active", t.number),
        )
        .with_detail("table_id", table_id)
        .with_detail("inactive", true)),
        Some(t) => Ok(t),
    }
}

pub fn check_capacity(table: &DiningTable, party_size: i32) -> AppResult<()> {
    if party_size > table.capacity {
        return Err(AppError::capacity_exceeded(party_size, table.capacity)
            .with_detail("table_id", table.id));
    }
    Ok(())
}

/// Start must be strictly later than `now`
pub fn check_future_start(start_at: i64, now: i64) -> AppResult<()> {
    if start_at <= now {
        return Err(AppError::out_of_schedule(start_at).with_detail("now", now));
    }
    Ok(())
}

/// End of the booking window, rejecting starts whose end overflows
pub fn window_end(start_at: i64) -> AppResult<i64> {
    end_for(start_at).ok_or_else(|| {
        AppError::validation("start_at is too far in the future")
            .with_detail("field", "start_at")
            .with_detail("start_at", start_at)
    })
}

pub fn check_no_overlap(conflict: Option<Reservation>, table_id: i64) -> AppResult<()> {
    match conflict {
        Some(existing) => Err(AppError::overlapping_reservation(table_id)
            .with_detail("conflicting_reservation_id", existing.id)
            .with_detail("conflicting_start_at", existing.start_at)),
        None => Ok(()),
    }
}

/// New reservations start pending or confirmed
pub fn check_initial_status(status: ReservationStatus) -> AppResult<()> {
    if status.is_terminal() {
        return Err(AppError::validation(format!(
            "A reservation cannot be created as '{}'",
            status
        ))
        .with_detail("field", "status"));
    }
    Ok(())
}

/// Lifecycle guard; cancellation failures get their own code
pub fn check_transition(current: ReservationStatus, next: ReservationStatus) -> AppResult<()> {
    if current.can_transition_to(next) {
        return Ok(());
    }
    if next == ReservationStatus::Cancelled {
        Err(AppError::cancellation_not_allowed(current.as_str()))
    } else {
        Err(AppError::invalid_transition(current.as_str(), next.as_str()))
    }
}
