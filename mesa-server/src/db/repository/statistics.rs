//! Statistics Repository
//!
//! Read-only aggregates over the reservation table. Callers pass business-day
//! boundaries already converted to millis.

use super::RepoResult;
use shared::models::{FrequentCustomer, PopularTable, ReservationSummary};
use sqlx::SqlitePool;

/// Number of customers returned by [`frequent_customers`]
pub const FREQUENT_CUSTOMERS_LIMIT: i64 = 10;

/// Reservation count and covers for `[from, to)`, cancelled excluded
pub async fn occupancy(pool: &SqlitePool, from: i64, to: i64) -> RepoResult<(i64, i64)> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(party_size), 0) FROM reservation WHERE start_at >= ?1 AND start_at < ?2 AND status <> 'cancelada'",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Top customers by reservation count, every status counted
pub async fn frequent_customers(pool: &SqlitePool) -> RepoResult<Vec<FrequentCustomer>> {
    let rows = sqlx::query_as::<_, FrequentCustomer>(
        "SELECT r.customer_id, c.name AS customer_name, COUNT(*) AS reservations FROM reservation r LEFT JOIN customer c ON c.id = r.customer_id GROUP BY r.customer_id ORDER BY reservations DESC, r.customer_id LIMIT ?",
    )
    .bind(FREQUENT_CUSTOMERS_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Tables ranked by reservation count, every status counted
pub async fn popular_tables(pool: &SqlitePool) -> RepoResult<Vec<PopularTable>> {
    let rows = sqlx::query_as::<_, PopularTable>(
        "SELECT r.table_id, t.number AS table_number, COUNT(*) AS reservations FROM reservation r LEFT JOIN dining_table t ON t.id = r.table_id GROUP BY r.table_id ORDER BY reservations DESC, r.table_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn summary(pool: &SqlitePool) -> RepoResult<ReservationSummary> {
    let row = sqlx::query_as::<_, ReservationSummary>(
        "SELECT COUNT(*) AS total, \
         COALESCE(SUM(CASE WHEN status = 'pendiente' THEN 1 ELSE 0 END), 0) AS pending, \
         COALESCE(SUM(CASE WHEN status = 'confirmada' THEN 1 ELSE 0 END), 0) AS confirmed, \
         COALESCE(SUM(CASE WHEN status = 'completada' THEN 1 ELSE 0 END), 0) AS completed, \
         COALESCE(SUM(CASE WHEN status = 'cancelada' THEN 1 ELSE 0 END), 0) AS cancelled \
         FROM reservation",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}
