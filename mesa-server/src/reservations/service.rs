//! Reservation operations
//!
//! `now` is passed in by the caller (handlers use `shared::util::now_millis`)
//! so the time rules are testable.

use chrono_tz::Tz;
use shared::error::{AppError, AppResult};
use shared::models::{
    Reservation, ReservationCreate, ReservationFilter, ReservationStatus, ReservationUpdate,
};
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::rules;
use crate::db::repository::reservation::{NewReservation, ReservationQuery};
use crate::db::repository::{RepoError, customer, dining_table, reservation};
use crate::utils::time::{day_range_millis, format_millis, parse_date};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_party_size};

/// Reservations matching `filter`, ordered by start
pub async fn list(
    pool: &SqlitePool,
    filter: ReservationFilter,
    tz: Tz,
) -> AppResult<Vec<Reservation>> {
    let start_range = match filter.date.as_deref() {
        Some(date) => Some(day_range_millis(parse_date(date)?, tz)),
        None => None,
    };
    let query = ReservationQuery {
        start_range,
        customer_id: filter.customer_id,
        table_id: filter.table_id,
        status: filter.status,
    };
    Ok(reservation::find_all(pool, &query).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Reservation> {
    reservation::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::reservation_not_found(id))
}

/// Validate and store a new reservation
pub async fn create(
    pool: &SqlitePool,
    data: ReservationCreate,
    now: i64,
    tz: Tz,
) -> AppResult<Reservation> {
    let (customer_id, table_id, start_at) = (data.customer_id, data.table_id, data.start_at);
    match try_create(pool, data, now).await {
        Ok(r) => {
            info!(
                reservation_id = r.id,
                customer_id,
                table_id,
                party_size = r.party_size,
                start = %format_millis(r.start_at, tz),
                "Reservation accepted"
            );
            Ok(r)
        }
        Err(e) => {
            warn!(
                customer_id,
                table_id,
                start = %format_millis(start_at, tz),
                code = %e.code,
                reason = %e.message,
                "Reservation rejected"
            );
            Err(e)
        }
    }
}

async fn try_create(pool: &SqlitePool, data: ReservationCreate, now: i64) -> AppResult<Reservation> {
    validate_party_size(data.party_size)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    rules::check_initial_status(data.status)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    // write lock first; a missing table is reported after the customer check
    dining_table::lock_for_booking(&mut *tx, data.table_id).await?;

    let customer = customer::find_by_id(&mut *tx, data.customer_id).await?;
    rules::require_customer(customer, data.customer_id)?;

    let table = dining_table::find_by_id(&mut *tx, data.table_id).await?;
    let table = rules::require_bookable_table(table, data.table_id)?;

    rules::check_capacity(&table, data.party_size)?;
    rules::check_future_start(data.start_at, now)?;

    let end_at = rules::window_end(data.start_at)?;
    let conflict =
        reservation::find_overlapping(&mut *tx, table.id, data.start_at, end_at, None).await?;
    rules::check_no_overlap(conflict, table.id)?;

    let row = NewReservation {
        customer_id: data.customer_id,
        table_id: table.id,
        start_at: data.start_at,
        end_at,
        party_size: data.party_size,
        status: data.status,
        notes: data.notes,
        created_at: now,
    };
    let id = reservation::insert(&mut *tx, &row).await?;
    let created = reservation::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to create reservation"))?;

    tx.commit().await.map_err(RepoError::from)?;
    Ok(created)
}

/// Apply a partial update, re-validating the merged reservation
///
/// The future-start rule only applies when the start moves.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    patch: ReservationUpdate,
    now: i64,
    tz: Tz,
) -> AppResult<Reservation> {
    match try_update(pool, id, patch, now).await {
        Ok(r) => {
            info!(
                reservation_id = id,
                table_id = r.table_id,
                status = %r.status,
                start = %format_millis(r.start_at, tz),
                "Reservation updated"
            );
            Ok(r)
        }
        Err(e) => {
            warn!(
                reservation_id = id,
                code = %e.code,
                reason = %e.message,
                "Reservation update rejected"
            );
            Err(e)
        }
    }
}

async fn try_update(
    pool: &SqlitePool,
    id: i64,
    patch: ReservationUpdate,
    now: i64,
) -> AppResult<Reservation> {
    if let Some(size) = patch.party_size {
        validate_party_size(size)?;
    }
    validate_optional_text(&patch.notes, "notes", MAX_NOTE_LEN)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if !reservation::lock_for_update(&mut *tx, id).await? {
        return Err(AppError::reservation_not_found(id));
    }
    let current = reservation::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::reservation_not_found(id))?;

    let status = match patch.status {
        Some(next) if next != current.status => {
            rules::check_transition(current.status, next)?;
            next
        }
        _ => current.status,
    };
    if current.status.is_terminal() {
        return Err(AppError::invalid_transition(
            current.status.as_str(),
            status.as_str(),
        ));
    }

    let start_at = patch.start_at.unwrap_or(current.start_at);
    let end_at = rules::window_end(start_at)?;
    let merged = Reservation {
        id,
        customer_id: patch.customer_id.unwrap_or(current.customer_id),
        table_id: patch.table_id.unwrap_or(current.table_id),
        start_at,
        end_at,
        party_size: patch.party_size.unwrap_or(current.party_size),
        status,
        notes: patch.notes.or(current.notes),
        created_at: current.created_at,
    };

    let customer = customer::find_by_id(&mut *tx, merged.customer_id).await?;
    rules::require_customer(customer, merged.customer_id)?;

    let table = dining_table::find_by_id(&mut *tx, merged.table_id).await?;
    let table = rules::require_bookable_table(table, merged.table_id)?;

    rules::check_capacity(&table, merged.party_size)?;
    if merged.start_at != current.start_at {
        rules::check_future_start(merged.start_at, now)?;
    }

    if merged.status.is_active() {
        let conflict = reservation::find_overlapping(
            &mut *tx,
            merged.table_id,
            merged.start_at,
            merged.end_at,
            Some(id),
        )
        .await?;
        rules::check_no_overlap(conflict, merged.table_id)?;
    }

    reservation::replace(&mut *tx, &merged).await?;
    tx.commit().await.map_err(RepoError::from)?;
    Ok(merged)
}

/// pendiente | confirmada → cancelada
pub async fn cancel(pool: &SqlitePool, id: i64) -> AppResult<Reservation> {
    transition(pool, id, ReservationStatus::Cancelled).await
}

/// pendiente → confirmada
pub async fn confirm_arrival(pool: &SqlitePool, id: i64) -> AppResult<Reservation> {
    transition(pool, id, ReservationStatus::Confirmed).await
}

/// confirmada → completada
pub async fn complete(pool: &SqlitePool, id: i64) -> AppResult<Reservation> {
    transition(pool, id, ReservationStatus::Completed).await
}

/// Status-only move; no overlap or capacity re-validation.
///
/// The UPDATE is conditional on the status read, so a concurrent change is
/// detected and re-evaluated against the fresh row.
async fn transition(pool: &SqlitePool, id: i64, next: ReservationStatus) -> AppResult<Reservation> {
    loop {
        let current = get(pool, id).await?;
        if let Err(e) = rules::check_transition(current.status, next) {
            warn!(
                reservation_id = id,
                from = %current.status,
                to = %next,
                "Status change rejected"
            );
            return Err(e);
        }

        let written = reservation::transition_status(pool, id, current.status, next).await?;
        if let Some(updated) = written {
            info!(reservation_id = id, from = %current.status, to = %next, "Status changed");
            return Ok(updated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::*;
    use shared::error::ErrorCode;

    const HOUR: i64 = 3_600_000;
    /// Fixed "now" for every test: day 100, 12:00 UTC
    const NOW: i64 = 100 * 24 * HOUR + 12 * HOUR;
    const TZ: Tz = Tz::UTC;

    fn tomorrow_at(hour: i64) -> i64 {
        101 * 24 * HOUR + hour * HOUR
    }

    fn booking(customer_id: i64, table_id: i64, start_at: i64, party_size: i32) -> ReservationCreate {
        ReservationCreate {
            customer_id,
            table_id,
            start_at,
            party_size,
            status: ReservationStatus::Pending,
            notes: None,
        }
    }

    struct Fixture {
        pool: SqlitePool,
        c1: i64,
        c2: i64,
        table5: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let c1 = insert_customer(&pool, "Ana", "ana@example.com").await;
        let c2 = insert_customer(&pool, "Bruno", "bruno@example.com").await;
        let table5 = insert_table(&pool, 5, 4).await;
        Fixture {
            pool,
            c1,
            c2,
            table5,
        }
    }

    #[tokio::test]
    async fn test_dinner_scenario() {
        let f = fixture().await;

        let a = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 4), NOW, TZ)
            .await
            .unwrap();
        assert_eq!(a.end_at, tomorrow_at(21));
        assert_eq!(a.status, ReservationStatus::Pending);
        assert_eq!(a.created_at, NOW);

        let b = create(&f.pool, booking(f.c2, f.table5, tomorrow_at(20), 2), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(b.code, ErrorCode::OverlappingReservation);

        let c = create(&f.pool, booking(f.c2, f.table5, tomorrow_at(21), 2), NOW, TZ)
            .await
            .unwrap();
        assert_eq!(c.start_at, a.end_at);
    }

    #[tokio::test]
    async fn test_capacity_checked_before_overlap() {
        let f = fixture().await;
        let small = insert_table(&f.pool, 2, 2).await;
        create(&f.pool, booking(f.c1, small, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();

        let err = create(&f.pool, booking(f.c2, small, tomorrow_at(19), 3), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
    }

    #[tokio::test]
    async fn test_start_must_be_after_now() {
        let f = fixture().await;
        for start in [NOW, NOW - HOUR] {
            let err = create(&f.pool, booking(f.c1, f.table5, start, 2), NOW, TZ)
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::OutOfSchedule);
        }
        assert!(
            create(&f.pool, booking(f.c1, f.table5, NOW + 1, 2), NOW, TZ)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_lookup_order_customer_then_table() {
        let f = fixture().await;
        let err = create(&f.pool, booking(999, 888, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNotFound);

        let err = create(&f.pool, booking(f.c1, 888, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNotFound);

        sqlx::query("UPDATE dining_table SET is_active = 0 WHERE id = ?")
            .bind(f.table5)
            .execute(&f.pool)
            .await
            .unwrap();
        let err = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNotFound);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let f = fixture().await;
        let err = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 0), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let mut terminal = booking(f.c1, f.table5, tomorrow_at(19), 2);
        terminal.status = ReservationStatus::Completed;
        let err = create(&f.pool, terminal, NOW, TZ).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_cancel_then_rebook_same_window() {
        let f = fixture().await;
        let a = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        let cancelled = cancel(&f.pool, a.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let again = create(&f.pool, booking(f.c2, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        assert_ne!(again.id, a.id);
    }

    #[tokio::test]
    async fn test_lifecycle_guards() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();

        let r = confirm_arrival(&f.pool, r.id).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(
            confirm_arrival(&f.pool, r.id).await.unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );

        let r = complete(&f.pool, r.id).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);

        assert_eq!(
            cancel(&f.pool, r.id).await.unwrap_err().code,
            ErrorCode::CancellationNotAllowed
        );
        assert_eq!(
            confirm_arrival(&f.pool, r.id).await.unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            complete(&f.pool, r.id).await.unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            cancel(&f.pool, 4242).await.unwrap_err().code,
            ErrorCode::ReservationNotFound
        );
    }

    #[tokio::test]
    async fn test_pending_must_be_confirmed_before_completing() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(13), 2), NOW, TZ)
            .await
            .unwrap();
        assert_eq!(
            complete(&f.pool, r.id).await.unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(get(&f.pool, r.id).await.unwrap().status, ReservationStatus::Pending);

        let err = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                status: Some(ReservationStatus::Completed),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn test_start_too_far_ahead_is_rejected() {
        let f = fixture().await;
        let far = i64::MAX - 1000;

        let err = create(&f.pool, booking(f.c1, f.table5, far, 2), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.as_ref().unwrap()["field"], "start_at");

        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        let err = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                start_at: Some(far),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(get(&f.pool, r.id).await.unwrap().start_at, tomorrow_at(19));
    }

    #[tokio::test]
    async fn test_transition_returns_stored_row() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        update(
            &f.pool,
            r.id,
            ReservationUpdate {
                start_at: Some(tomorrow_at(21)),
                notes: Some("terraza".into()),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap();

        let confirmed = confirm_arrival(&f.pool, r.id).await.unwrap();
        assert_eq!(confirmed.start_at, tomorrow_at(21));
        assert_eq!(confirmed.end_at, tomorrow_at(23));
        assert_eq!(confirmed.notes.as_deref(), Some("terraza"));
    }

    #[tokio::test]
    async fn test_update_excludes_itself_from_overlap() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();

        // shift by one hour: overlaps only its own old window
        let moved = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                start_at: Some(tomorrow_at(20)),
                party_size: Some(4),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap();
        assert_eq!(moved.end_at, tomorrow_at(22));
        assert_eq!(moved.party_size, 4);
        assert_eq!(get(&f.pool, r.id).await.unwrap().start_at, tomorrow_at(20));
    }

    #[tokio::test]
    async fn test_update_validates_merged_record() {
        let f = fixture().await;
        let first = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        let second = create(&f.pool, booking(f.c2, f.table5, tomorrow_at(21), 2), NOW, TZ)
            .await
            .unwrap();

        let err = update(
            &f.pool,
            second.id,
            ReservationUpdate {
                start_at: Some(tomorrow_at(20)),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::OverlappingReservation);

        let err = update(
            &f.pool,
            first.id,
            ReservationUpdate {
                party_size: Some(5),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);

        let err = update(&f.pool, 777, ReservationUpdate::default(), NOW, TZ)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationNotFound);
    }

    #[tokio::test]
    async fn test_update_keeps_past_start_when_unchanged() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        let later = tomorrow_at(20);

        // reservation now in progress: editing notes is fine
        let edited = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                notes: Some("trona".into()),
                ..Default::default()
            },
            later,
            TZ,
        )
        .await
        .unwrap();
        assert_eq!(edited.notes.as_deref(), Some("trona"));

        // moving it into the past is not
        let err = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                start_at: Some(tomorrow_at(18)),
                ..Default::default()
            },
            later,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfSchedule);
    }

    #[tokio::test]
    async fn test_update_rejects_terminal_and_bad_transitions() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        confirm_arrival(&f.pool, r.id).await.unwrap();

        let err = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                status: Some(ReservationStatus::Pending),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);

        cancel(&f.pool, r.id).await.unwrap();
        let err = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                notes: Some("tarde".into()),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn test_update_to_cancelled_skips_overlap() {
        let f = fixture().await;
        let r = create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        let cancelled = update(
            &f.pool,
            r.id,
            ReservationUpdate {
                status: Some(ReservationStatus::Cancelled),
                ..Default::default()
            },
            NOW,
            TZ,
        )
        .await
        .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_list_by_business_day() {
        let f = fixture().await;
        create(&f.pool, booking(f.c1, f.table5, tomorrow_at(19), 2), NOW, TZ)
            .await
            .unwrap();
        create(&f.pool, booking(f.c2, f.table5, tomorrow_at(30), 2), NOW, TZ)
            .await
            .unwrap();

        // day 101 since the epoch
        let day = chrono::NaiveDate::from_ymd_opt(1970, 4, 12).unwrap();
        let filter = ReservationFilter {
            date: Some(crate::utils::time::format_date(day)),
            ..Default::default()
        };
        let rows = list(&f.pool, filter, TZ).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_id, f.c1);

        let err = list(
            &f.pool,
            ReservationFilter {
                date: Some("12-04-1970".into()),
                ..Default::default()
            },
            TZ,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_double_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesa.db");
        let db = crate::db::DbService::new(path.to_str().unwrap())
            .await
            .unwrap();
        let pool = db.pool;
        let table = insert_table(&pool, 1, 4).await;
        let mut customers = Vec::new();
        for i in 0..8 {
            customers.push(insert_customer(&pool, "Cliente", &format!("c{i}@example.com")).await);
        }

        let mut handles = Vec::new();
        for (i, customer_id) in customers.into_iter().enumerate() {
            let pool = pool.clone();
            // every window overlaps the next one
            let start = tomorrow_at(18) + (i as i64) * HOUR / 2;
            handles.push(tokio::spawn(async move {
                create(&pool, booking(customer_id, table, start, 2), NOW, TZ).await
            }));
        }

        let mut accepted = Vec::new();
        for h in handles {
            match h.await.unwrap() {
                Ok(r) => accepted.push(r),
                Err(e) => assert_eq!(e.code, ErrorCode::OverlappingReservation),
            }
        }
        assert!(!accepted.is_empty());
        for a in &accepted {
            for b in &accepted {
                if a.id != b.id {
                    assert!(!crate::reservations::overlaps(
                        a.start_at, a.end_at, b.start_at, b.end_at
                    ));
                }
            }
        }
    }
}
