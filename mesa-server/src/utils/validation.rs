//! Input validation helpers
//!
//! Centralized text length constants and field checks for customers,
//! tables and reservations. SQLite TEXT has no built-in length enforcement.

use shared::models::{MAX_TABLE_NUMBER, MIN_TABLE_NUMBER, TABLE_CAPACITIES};
use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names
pub const MAX_NAME_LEN: usize = 200;

/// Notes (customer notes, reservation notes)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: search terms, phone
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Customer names shorter than this are rejected
pub const MIN_CUSTOMER_NAME_LEN: usize = 3;

/// Phone numbers are exactly this many characters
pub const PHONE_LEN: usize = 9;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

// ── Customer fields ─────────────────────────────────────────────────

pub fn validate_customer_name(name: &str) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    if name.trim().chars().count() < MIN_CUSTOMER_NAME_LEN {
        return Err(AppError::validation(format!(
            "name must have at least {MIN_CUSTOMER_NAME_LEN} characters"
        ))
        .with_detail("field", "name"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.validate_email() {
        return Err(AppError::validation(format!("'{email}' is not a valid email address"))
            .with_detail("field", "email"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if phone.chars().count() != PHONE_LEN {
        return Err(AppError::validation(format!(
            "phone must be exactly {PHONE_LEN} characters"
        ))
        .with_detail("field", "phone"));
    }
    Ok(())
}

// ── Table fields ────────────────────────────────────────────────────

pub fn validate_table_number(number: i32) -> Result<(), AppError> {
    if !(MIN_TABLE_NUMBER..=MAX_TABLE_NUMBER).contains(&number) {
        return Err(AppError::validation(format!(
            "table number must be between {MIN_TABLE_NUMBER} and {MAX_TABLE_NUMBER}"
        ))
        .with_detail("field", "number")
        .with_detail("value", number));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if !TABLE_CAPACITIES.contains(&capacity) {
        return Err(AppError::validation(format!(
            "capacity must be one of {TABLE_CAPACITIES:?}"
        ))
        .with_detail("field", "capacity")
        .with_detail("value", capacity));
    }
    Ok(())
}

// ── Reservation fields ──────────────────────────────────────────────

pub fn validate_party_size(party_size: i32) -> Result<(), AppError> {
    if party_size < 1 {
        return Err(AppError::validation("party_size must be at least 1")
            .with_detail("field", "party_size")
            .with_detail("value", party_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn required_text() {
        assert!(validate_required_text("Ana", "name", 10).is_ok());
        assert!(validate_required_text("   ", "name", 10).is_err());
        let err = validate_required_text("abcdefghijk", "name", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "name");
    }

    #[test]
    fn optional_text() {
        assert!(validate_optional_text(&None, "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("corto".into()), "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("largo!".into()), "notes", 5).is_err());
    }

    #[test]
    fn customer_fields() {
        assert!(validate_customer_name("Ana").is_ok());
        assert!(validate_customer_name("Al").is_err());
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.example.com").is_err());
        assert!(validate_email("ana@").is_err());
        assert!(validate_phone("612345678").is_ok());
        assert!(validate_phone("61234567").is_err());
        assert!(validate_phone("6123456789").is_err());
    }

    #[test]
    fn table_fields() {
        assert!(validate_table_number(1).is_ok());
        assert!(validate_table_number(99).is_ok());
        assert!(validate_table_number(0).is_err());
        assert!(validate_table_number(100).is_err());
        for c in [2, 4, 6, 8] {
            assert!(validate_capacity(c).is_ok());
        }
        assert!(validate_capacity(3).is_err());
        assert!(validate_capacity(10).is_err());
    }

    #[test]
    fn party_size() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(-2).is_err());
    }
}
