use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// A stored message.
#[derive(ToSchema)]
pub struct MessageDoc {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    /// Image URLs or `data:` URIs
    pub images: Vec<String>,
    /// Video URLs
    pub videos: Vec<String>,
    pub color: String,
    pub rotation: f64,
    #[schema(format = DateTime)]
    pub timestamp: String,
}

/// New message. Missing `color`/`rotation` are picked by the server.
#[derive(ToSchema)]
pub struct MessageDraftDoc {
    pub name: String,
    pub text: String,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub color: Option<String>,
    pub rotation: Option<f64>,
}

#[derive(ToSchema)]
pub struct MessagePatchDoc {
    pub name: Option<String>,
    pub text: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub color: Option<String>,
    pub rotation: Option<f64>,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    /// Field errors, a parse message, or absent
    #[schema(value_type = Option<Object>)]
    pub details: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::messages::list,
        crate::routes::messages::create,
        crate::routes::messages::update,
        crate::routes::messages::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            MessageDraftDoc,
            MessagePatchDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "messages")
    )
)]
pub struct ApiDoc;
