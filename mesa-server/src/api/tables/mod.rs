//! Dining Table API module (`/mesas`)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/mesas", get(handler::list).post(handler::create))
        .route("/mesas/", get(handler::list).post(handler::create))
        .route("/mesas/disponibles", get(handler::find_available))
        .route("/mesas/disponibles/", get(handler::find_available))
        .route(
            "/mesas/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/mesas/{id}/",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
