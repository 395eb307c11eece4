//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::{Sqlite, SqlitePool};

const TABLE_SELECT: &str = "SELECT id, number, capacity, location, is_active FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY number");
    let rows = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn find_by_number(pool: &SqlitePool, number: i32) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE number = ? LIMIT 1");
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active table with this number that no pending/confirmed reservation
/// covers at instant `at` (`start_at <= at < end_at`)
pub async fn find_available(
    pool: &SqlitePool,
    number: i32,
    at: i64,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!(
        "{TABLE_SELECT} t WHERE t.number = ?1 AND t.is_active = 1 AND NOT EXISTS (SELECT 1 FROM reservation r WHERE r.table_id = t.id AND r.status IN ('pendiente', 'confirmada') AND r.start_at <= ?2 AND r.end_at > ?2)"
    );
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(number)
        .bind(at)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dining_table (number, capacity, location, is_active) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.location)
    .bind(data.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let rows = sqlx::query(
        "UPDATE dining_table SET number = COALESCE(?1, number), capacity = COALESCE(?2, capacity), location = COALESCE(?3, location), is_active = COALESCE(?4, is_active) WHERE id = ?5",
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.location)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dining table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Dining table {id} not found")))
}

/// Take SQLite's write lock on behalf of a reservation write.
///
/// A no-op update on the table row; returns false when the table is missing.
pub async fn lock_for_booking(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dining_table SET id = id WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Hard delete unless an active reservation references the table.
///
/// Returns `false` when nothing was deleted.
pub async fn delete_if_idle(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM dining_table WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM reservation WHERE table_id = ?1 AND status IN ('pendiente', 'confirmada'))",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
