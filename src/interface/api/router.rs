//! API router configuration

use super::handlers::{
    end_call, handle_ivr_turn, handle_provider_event, health_check, start_call, AppState,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    let call_routes = Router::new()
        .route("/call/start", post(start_call))
        .route("/call/ivr", post(handle_ivr_turn))
        .route("/call/end", post(end_call))
        .route("/call/events", post(handle_provider_event));

    Router::new()
        .route("/health", get(health_check))
        .merge(call_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
