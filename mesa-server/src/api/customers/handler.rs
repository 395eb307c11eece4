//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Customer, CustomerCreate, CustomerSearch, CustomerUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, customer};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_customer_name, validate_email,
    validate_optional_text, validate_phone, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn already_exists(email: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CustomerAlreadyExists,
        format!("A customer with email {} already exists", email),
    )
    .with_detail("email", email)
}

/// Emails compare case-insensitively; store them trimmed and lowercased
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// GET /clientes - all customers ordered by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

/// GET /clientes/buscar?q= - substring search over name, email and phone
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<CustomerSearch>,
) -> AppResult<Json<Vec<Customer>>> {
    validate_required_text(&query.q, "q", MAX_SHORT_TEXT_LEN)?;
    let customers = customer::search(&state.pool, query.q.trim()).await?;
    Ok(Json(customers))
}

/// GET /clientes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let found = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::customer_not_found(id))?;
    Ok(Json(found))
}

/// POST /clientes
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    payload.name = payload.name.trim().to_string();
    payload.email = normalize_email(&payload.email);
    payload.phone = payload.phone.trim().to_string();

    validate_customer_name(&payload.name)?;
    validate_email(&payload.email)?;
    validate_phone(&payload.phone)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if customer::find_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(already_exists(&payload.email));
    }

    let email = payload.email.clone();
    let created = customer::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => already_exists(&email),
            other => other.into(),
        })?;

    tracing::info!(customer_id = created.id, "Customer registered");
    Ok(Json(created))
}

/// PUT /clientes/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::customer_not_found(id))?;

    if let Some(name) = payload.name.as_mut() {
        *name = name.trim().to_string();
        validate_customer_name(name)?;
    }
    if let Some(phone) = payload.phone.as_mut() {
        *phone = phone.trim().to_string();
        validate_phone(phone)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if let Some(email) = payload.email.as_mut() {
        *email = normalize_email(email);
        validate_email(email)?;
        if let Some(owner) = customer::find_by_email(&state.pool, email).await?
            && owner.id != id
        {
            return Err(already_exists(email));
        }
    }

    let email = payload.email.clone().unwrap_or_default();
    let updated = customer::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::customer_not_found(id),
            RepoError::Duplicate(_) => already_exists(&email),
            other => other.into(),
        })?;
    Ok(Json(updated))
}

/// DELETE /clientes/:id - refused while an active reservation remains
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<i64>> {
    customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::customer_not_found(id))?;

    if !customer::delete_if_idle(&state.pool, id).await? {
        return Err(AppError::with_message(
            ErrorCode::CustomerHasActiveReservations,
            format!("Customer {} has active reservations", id),
        )
        .with_detail("customer_id", id));
    }

    tracing::info!(customer_id = id, "Customer deleted");
    Ok(ApiResponse::success_with_message(
        format!("Customer {} deleted", id),
        id,
    ))
}
