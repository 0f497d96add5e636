use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::{Message, MessageDraft, MessagePatch};
use tracing::info;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// A path segment that is not a UUID cannot name a stored message.
fn parse_id(raw: &str) -> Result<Uuid, JsonApiError> {
    Uuid::parse_str(raw).map_err(|_| JsonApiError::not_found())
}

#[utoipa::path(
    get, path = "/api/messages", tag = "messages",
    responses(
        (status = 200, description = "All messages, oldest first", body = [crate::openapi::MessageDoc]),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Message>>, JsonApiError> {
    let messages = state.messages.list().await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post, path = "/api/messages", tag = "messages",
    request_body = crate::openapi::MessageDraftDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid payload", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let Json(draft) = payload?;
    let created = state.messages.create(draft).await?;
    info!(id = %created.id, name = %created.name, "message posted");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message ID")),
    request_body = crate::openapi::MessagePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid payload", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MessagePatch>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let updated = state.messages.update(id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    if state.messages.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found())
    }
}
