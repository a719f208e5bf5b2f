pub mod checkin;
pub mod profile;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/profile", post(profile::save_profile))
        .route("/profile/:user_id", get(profile::get_profile))
        .route("/checkin", post(checkin::create_checkin))
        .route("/checkin/:user_id", get(checkin::list_checkins))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
