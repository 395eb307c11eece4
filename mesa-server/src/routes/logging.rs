//! Request logging middleware
//!
//! One line when a request arrives and one when it finishes, tagged with
//! the Mesa resource (`clientes`, `mesas`, `reservas`, `estadisticas`) and,
//! for item routes, the numeric id taken from the URI.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// Resource name and item id for a request path
///
/// `/reservas/12/confirmar` gives `("reservas", Some(12))`; `/health` gives
/// `("health", None)` and `/` gives `("root", None)`.
pub fn resource_of(path: &str) -> (&str, Option<i64>) {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let resource = segments.next().unwrap_or("root");
    let id = segments.next().and_then(|s| s.parse().ok());
    (resource, id)
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let (resource, item_id) = resource_of(req.uri().path());
    let resource = resource.to_string();

    info!(
        request_id = %request_id,
        method = %method,
        route = %route,
        resource = %resource,
        item_id = ?item_id,
        "Request received"
    );

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if response.status().is_client_error() || response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            resource = %resource,
            item_id = ?item_id,
            status,
            latency_ms,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            resource = %resource,
            item_id = ?item_id,
            status,
            latency_ms,
            "Request served"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::resource_of;

    #[test]
    fn resource_and_id_from_path() {
        assert_eq!(resource_of("/reservas/12/confirmar"), ("reservas", Some(12)));
        assert_eq!(resource_of("/mesas/7/"), ("mesas", Some(7)));
        assert_eq!(resource_of("/mesas/disponibles"), ("mesas", None));
        assert_eq!(resource_of("/clientes/buscar/"), ("clientes", None));
        assert_eq!(resource_of("/health"), ("health", None));
        assert_eq!(resource_of("/"), ("root", None));
    }
}
