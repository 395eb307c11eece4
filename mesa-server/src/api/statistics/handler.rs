//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use shared::models::{
    DailyOccupancy, DailyOccupancyQuery, FrequentCustomer, PopularTable, ReservationSummary,
    WeeklyOccupancy, WeeklyOccupancyQuery,
};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::statistics;
use crate::utils::time::{day_range_millis, format_date, parse_date};
use crate::utils::{AppError, AppResult};

const DAYS_PER_WEEK: u64 = 7;

async fn occupancy_for(pool: &SqlitePool, date: NaiveDate, tz: Tz) -> AppResult<DailyOccupancy> {
    let (from, to) = day_range_millis(date, tz);
    let (reservations, covers) = statistics::occupancy(pool, from, to).await?;
    Ok(DailyOccupancy {
        date: format_date(date),
        reservations,
        covers,
    })
}

/// GET /estadisticas/ocupacion/diaria?fecha=
pub async fn daily_occupancy(
    State(state): State<ServerState>,
    Query(query): Query<DailyOccupancyQuery>,
) -> AppResult<Json<DailyOccupancy>> {
    let date = parse_date(&query.date)?;
    let day = occupancy_for(&state.pool, date, state.timezone()).await?;
    Ok(Json(day))
}

/// GET /estadisticas/ocupacion/semanal?fecha_inicio= - seven days, empty days as zero
pub async fn weekly_occupancy(
    State(state): State<ServerState>,
    Query(query): Query<WeeklyOccupancyQuery>,
) -> AppResult<Json<WeeklyOccupancy>> {
    let start = parse_date(&query.start_date)?;
    let tz = state.timezone();

    let mut days = Vec::with_capacity(DAYS_PER_WEEK as usize);
    for offset in 0..DAYS_PER_WEEK {
        let date = start
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| AppError::invalid_format("Start date out of range"))?;
        days.push(occupancy_for(&state.pool, date, tz).await?);
    }

    let end_date = days
        .last()
        .map(|d| d.date.clone())
        .unwrap_or_else(|| format_date(start));
    let total_reservations = days.iter().map(|d| d.reservations).sum();

    Ok(Json(WeeklyOccupancy {
        start_date: format_date(start),
        end_date,
        days,
        total_reservations,
    }))
}

/// GET /estadisticas/clientes-frecuentes
pub async fn frequent_customers(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<FrequentCustomer>>> {
    let rows = statistics::frequent_customers(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /estadisticas/mesas-populares
pub async fn popular_tables(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PopularTable>>> {
    let rows = statistics::popular_tables(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /estadisticas/resumen
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<ReservationSummary>> {
    let summary = statistics::summary(&state.pool).await?;
    Ok(Json(summary))
}
