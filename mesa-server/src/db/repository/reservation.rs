//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus};
use sqlx::{Sqlite, SqlitePool};

const RESERVATION_SELECT: &str = "SELECT id, customer_id, table_id, start_at, end_at, party_size, status, notes, created_at FROM reservation";

/// Resolved list filters (calendar date already turned into a millis range)
#[derive(Debug, Clone, Default)]
pub struct ReservationQuery {
    /// `[from, to)` on `start_at`
    pub start_range: Option<(i64, i64)>,
    pub customer_id: Option<i64>,
    pub table_id: Option<i64>,
    pub status: Option<ReservationStatus>,
}

/// Row to insert; `end_at` is computed by the caller
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: i64,
    pub table_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub party_size: i32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: i64,
}

pub async fn find_all(pool: &SqlitePool, query: &ReservationQuery) -> RepoResult<Vec<Reservation>> {
    let (from, to) = query.start_range.unzip();
    let sql = format!(
        "{RESERVATION_SELECT} WHERE (?1 IS NULL OR start_at >= ?1) AND (?2 IS NULL OR start_at < ?2) AND (?3 IS NULL OR customer_id = ?3) AND (?4 IS NULL OR table_id = ?4) AND (?5 IS NULL OR status = ?5) ORDER BY start_at, id"
    );
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .bind(from)
        .bind(to)
        .bind(query.customer_id)
        .bind(query.table_id)
        .bind(query.status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Take SQLite's write lock before an edit; false when the row is missing.
///
/// Touches only `id`, so the overlap triggers do not fire.
pub async fn lock_for_update(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE reservation SET id = id WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// First active reservation on `table_id` sharing time with `[start_at, end_at)`
///
/// `exclude_id` skips the reservation being edited.
pub async fn find_overlapping(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    table_id: i64,
    start_at: i64,
    end_at: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Option<Reservation>> {
    let sql = format!(
        "{RESERVATION_SELECT} WHERE table_id = ?1 AND status IN ('pendiente', 'confirmada') AND start_at < ?3 AND end_at > ?2 AND (?4 IS NULL OR id <> ?4) ORDER BY start_at LIMIT 1"
    );
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(table_id)
        .bind(start_at)
        .bind(end_at)
        .bind(exclude_id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn insert(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    data: &NewReservation,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reservation (customer_id, table_id, start_at, end_at, party_size, status, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(data.customer_id)
    .bind(data.table_id)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.party_size)
    .bind(data.status)
    .bind(&data.notes)
    .bind(data.created_at)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Overwrite every mutable column with the merged record
pub async fn replace(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    data: &Reservation,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE reservation SET customer_id = ?1, table_id = ?2, start_at = ?3, end_at = ?4, party_size = ?5, status = ?6, notes = ?7 WHERE id = ?8",
    )
    .bind(data.customer_id)
    .bind(data.table_id)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.party_size)
    .bind(data.status)
    .bind(&data.notes)
    .bind(data.id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {} not found", data.id)));
    }
    Ok(())
}

/// Move `id` to `next` only if it is still in `expected`.
///
/// Returns the row as written, or `None` when it changed underneath (or is missing).
pub async fn transition_status(
    pool: &SqlitePool,
    id: i64,
    expected: ReservationStatus,
    next: ReservationStatus,
) -> RepoResult<Option<Reservation>> {
    let row = sqlx::query_as::<_, Reservation>(
        "UPDATE reservation SET status = ?1 WHERE id = ?2 AND status = ?3 RETURNING id, customer_id, table_id, start_at, end_at, party_size, status, notes, created_at",
    )
    .bind(next)
    .bind(id)
    .bind(expected)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
