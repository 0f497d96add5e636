use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod messages;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn api_not_found() -> JsonApiError {
    JsonApiError::not_found()
}

/// Build the application router: message API under `/api`, health, OpenAPI
/// document, and the static client bundle from `frontend_dir` for every other path.
/// `max_body_bytes` caps request bodies on the API, which carry inline media.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &Path, max_body_bytes: usize) -> Router {
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join("index.html")));

    let api = Router::new()
        .route("/messages", get(messages::list).post(messages::create))
        .route("/messages/:id", patch(messages::update).delete(messages::delete))
        .route("/openapi.json", get(openapi_json))
        .fallback(api_not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
