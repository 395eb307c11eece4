//! Reservation API Handlers
//!
//! Thin wrappers over [`crate::reservations::service`]; the wall clock is
//! read here.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Reservation, ReservationCreate, ReservationFilter, ReservationUpdate};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::reservations::service;
use crate::utils::AppResult;

/// GET /reservas?fecha=&cliente_id=&mesa_id=&estado=
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ReservationFilter>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = service::list(&state.pool, filter, state.timezone()).await?;
    Ok(Json(reservations))
}

/// GET /reservas/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = service::get(&state.pool, id).await?;
    Ok(Json(reservation))
}

/// POST /reservas
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation =
        service::create(&state.pool, payload, now_millis(), state.timezone()).await?;
    Ok(Json(reservation))
}

/// PUT /reservas/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation =
        service::update(&state.pool, id, payload, now_millis(), state.timezone()).await?;
    Ok(Json(reservation))
}

/// DELETE /reservas/:id - cancels; the row is kept
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = service::cancel(&state.pool, id).await?;
    Ok(Json(reservation))
}

/// PATCH /reservas/:id/confirmar
pub async fn confirm_arrival(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = service::confirm_arrival(&state.pool, id).await?;
    Ok(Json(reservation))
}

/// PATCH /reservas/:id/completar
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = service::complete(&state.pool, id).await?;
    Ok(Json(reservation))
}
