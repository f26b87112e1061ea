//! StoreBuilder web server library.
//!
//! One binary serves both the operator console and every tenant storefront.
//! The request host decides which: see [`dispatch`].
//!
//! Exposed as a library so the router can be tested end to end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::dispatch::Dispatcher;
use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Build the full application router.
///
/// Health endpoints answer on every host; everything else goes through the
/// tenant dispatcher.
pub fn app(state: AppState) -> Router {
    let dispatcher = Dispatcher::new(
        routes::storefront_routes().with_state(state.clone()),
        routes::console_routes().with_state(state.clone()),
        state.config().trust_forwarded_host,
    );
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .with_state(state)
        .merge(dispatcher.into_router())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
                tenant = tracing::field::Empty,
            )
        }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the backend cannot be reached.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.backend().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Backend not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
