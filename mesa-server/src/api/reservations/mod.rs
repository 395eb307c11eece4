//! Reservation API module (`/reservas`)

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/reservas", get(handler::list).post(handler::create))
        .route("/reservas/", get(handler::list).post(handler::create))
        .route(
            "/reservas/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::cancel),
        )
        .route(
            "/reservas/{id}/",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::cancel),
        )
        .route("/reservas/{id}/confirmar", patch(handler::confirm_arrival))
        .route("/reservas/{id}/confirmar/", patch(handler::confirm_arrival))
        .route("/reservas/{id}/completar", patch(handler::complete))
        .route("/reservas/{id}/completar/", patch(handler::complete))
}
