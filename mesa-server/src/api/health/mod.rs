//! Service endpoints - public, unversioned

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::banner))
        .route("/version", get(handler::version))
        .route("/health", get(handler::health))
}
