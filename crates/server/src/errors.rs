use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use service::ServiceError;
use tracing::error;

/// JSON error body: `{"error": <title>, "details": ...}`. `details` is omitted when absent.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: Option<Value>) -> Self {
        Self { status, error: error.into(), details }
    }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, "Not Found", None) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, details: self.details.as_ref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => Self::new(
                StatusCode::BAD_REQUEST,
                "Validation Error",
                serde_json::to_value(&errs).ok(),
            ),
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(Value::String(msg))),
            ServiceError::StorageUnavailable(msg) => {
                error!(error = %msg, "storage unavailable");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

/// A body over the configured limit is a 413; any other body that fails to parse
/// as the expected JSON shape is a 400.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large", Some(Value::String(rejection.body_text())));
        }
        Self::new(StatusCode::BAD_REQUEST, "Invalid Payload", Some(Value::String(rejection.body_text())))
    }
}
