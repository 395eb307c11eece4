//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableAvailabilityQuery};

use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table};
use crate::utils::validation::{validate_capacity, validate_table_number};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn already_exists(number: i32) -> AppError {
    AppError::with_message(
        ErrorCode::TableAlreadyExists,
        format!("Table number {} already exists", number),
    )
    .with_detail("number", number)
}

/// GET /mesas - all tables ordered by number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.pool).await?;
    Ok(Json(tables))
}

/// GET /mesas/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;
    Ok(Json(table))
}

/// GET /mesas/disponibles?numero=&fecha_hora= - the table if free at that instant
pub async fn find_available(
    State(state): State<ServerState>,
    Query(query): Query<TableAvailabilityQuery>,
) -> AppResult<Json<Option<DiningTable>>> {
    validate_table_number(query.number)?;
    let table = dining_table::find_available(&state.pool, query.number, query.at).await?;
    Ok(Json(table))
}

/// POST /mesas
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_table_number(payload.number)?;
    validate_capacity(payload.capacity)?;

    if dining_table::find_by_number(&state.pool, payload.number)
        .await?
        .is_some()
    {
        return Err(already_exists(payload.number));
    }

    let number = payload.number;
    let table = dining_table::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => already_exists(number),
            other => other.into(),
        })?;

    tracing::info!(table_id = table.id, number, capacity = table.capacity, "Table created");
    Ok(Json(table))
}

/// PUT /mesas/:id - partial update; number stays unique
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;

    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
    }
    if let Some(number) = payload.number {
        validate_table_number(number)?;
        if let Some(owner) = dining_table::find_by_number(&state.pool, number).await?
            && owner.id != id
        {
            return Err(already_exists(number));
        }
    }

    let number = payload.number.unwrap_or_default();
    let table = dining_table::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::table_not_found(id),
            RepoError::Duplicate(_) => already_exists(number),
            other => other.into(),
        })?;
    Ok(Json(table))
}

/// DELETE /mesas/:id - refused while an active reservation references it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<i64>> {
    dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;

    if !dining_table::delete_if_idle(&state.pool, id).await? {
        return Err(AppError::with_message(
            ErrorCode::TableHasActiveReservations,
            format!("Table {} has active reservations", id),
        )
        .with_detail("table_id", id));
    }

    tracing::info!(table_id = id, "Table deleted");
    Ok(ApiResponse::success_with_message(
        format!("Table {} deleted", id),
        id,
    ))
}
