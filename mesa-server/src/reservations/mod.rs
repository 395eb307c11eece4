//! Reservation engine
//!
//! Decides whether a booking may be accepted and moves reservations through
//! their lifecycle. Every write runs in one SQLite transaction whose first
//! statement takes the write lock, so validation reads see the state the
//! write will commit against. The overlap triggers in the schema back this up.

pub mod rules;
pub mod schedule;
pub mod service;

pub use schedule::{RESERVATION_DURATION_MS, end_for, overlaps};
