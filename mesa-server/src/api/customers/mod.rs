//! Customer API module (`/clientes`)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/clientes", get(handler::list).post(handler::create))
        .route("/clientes/", get(handler::list).post(handler::create))
        .route("/clientes/buscar", get(handler::search))
        .route("/clientes/buscar/", get(handler::search))
        .route(
            "/clientes/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/clientes/{id}/",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
