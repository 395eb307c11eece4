//! Statistics API module (`/estadisticas`) - read-only

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/estadisticas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/ocupacion/diaria", get(handler::daily_occupancy))
        .route("/ocupacion/diaria/", get(handler::daily_occupancy))
        .route("/ocupacion/semanal", get(handler::weekly_occupancy))
        .route("/ocupacion/semanal/", get(handler::weekly_occupancy))
        .route("/clientes-frecuentes", get(handler::frequent_customers))
        .route("/clientes-frecuentes/", get(handler::frequent_customers))
        .route("/mesas-populares", get(handler::popular_tables))
        .route("/mesas-populares/", get(handler::popular_tables))
        .route("/resumen", get(handler::summary))
        .route("/resumen/", get(handler::summary))
}
