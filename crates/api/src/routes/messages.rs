//! Message board routes.

use axum::{
    Json, Router,
    extract::{Multipart, Query, State, multipart::MultipartError},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, error::ApiError};
use msgcreator_core::message::{MessageEntry, MessageService, PostMessageInput};
use msgcreator_db::MessageRepository;

/// Creates the message routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_message))
        .route("/messages", get(list_messages))
        .route("/get-image-url", get(get_image_url))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Status text.
    pub message: String,
    /// New message ID.
    pub id: i64,
    /// Generated image ID.
    pub image_id: String,
    /// Object-store key of the image.
    pub s3_key: String,
}

/// A listed message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message ID.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Image ID.
    pub image_id: String,
    /// Public image URL, null when it cannot be generated.
    pub image_url: Option<String>,
    /// Created at timestamp (ISO 8601), null when unknown.
    pub created_at: Option<String>,
}

impl From<MessageEntry> for MessageResponse {
    fn from(entry: MessageEntry) -> Self {
        Self {
            id: entry.id,
            message: entry.message,
            image_id: entry.image_id,
            image_url: entry.image_url,
            created_at: entry.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for the message list.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponse {
    /// Messages, newest first.
    pub messages: Vec<MessageResponse>,
    /// Number of messages.
    pub count: usize,
}

/// Query for an image URL.
#[derive(Debug, Deserialize)]
pub struct ImageUrlQuery {
    /// Image ID.
    #[serde(default)]
    pub image_id: Option<String>,
    /// File extension including the dot; `.jpg` when omitted.
    #[serde(default)]
    pub extension: Option<String>,
}

/// Response for an image URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUrlResponse {
    /// Public image URL.
    pub url: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn message_service(state: &AppState) -> MessageService<MessageRepository> {
    MessageService::new(state.storage.clone(), state.messages.clone(), state.cdn.clone())
}

/// Reading the multipart body failed part-way.
///
/// Bodies over the upload limit keep their 413; every other read failure is
/// a server error.
fn upload_read_error(err: &MultipartError) -> ApiError {
    let message = format!("Upload failed: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, message);
    }

    error!(error = %err.body_text(), "Upload failed while reading the request body");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Collect the `file` and `message` parts of an upload. Other parts are ignored.
async fn read_upload(multipart: &mut Multipart) -> Result<PostMessageInput, ApiError> {
    let mut input = PostMessageInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_read_error(&e))?
    {
        match field.name() {
            Some("file") => {
                input.filename = field.file_name().map(ToString::to_string);
                input.data = Some(field.bytes().await.map_err(|e| upload_read_error(&e))?);
            }
            Some("message") => {
                input.message = field.text().await.map_err(|e| upload_read_error(&e))?;
            }
            _ => {}
        }
    }

    Ok(input)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload`
/// Store the image and record the message.
async fn upload_message(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let input = read_upload(&mut multipart).await?;

    let posted = message_service(&state)
        .post(input)
        .await
        .map_err(|e| ApiError::from_app(e, "Upload failed"))?;

    info!(
        id = posted.id,
        image_id = %posted.image_id,
        s3_key = %posted.object_key,
        "Message uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Upload success".to_string(),
            id: posted.id,
            image_id: posted.image_id,
            s3_key: posted.object_key,
        }),
    ))
}

/// GET `/messages`
/// List all messages, newest first, with image URLs.
async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let entries = message_service(&state)
        .list()
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to fetch messages"))?;

    let messages: Vec<MessageResponse> = entries.into_iter().map(MessageResponse::from).collect();

    Ok(Json(MessageListResponse {
        count: messages.len(),
        messages,
    }))
}

/// GET `/get-image-url?image_id=...&extension=...`
/// Build the public URL for one image.
async fn get_image_url(
    State(state): State<AppState>,
    Query(query): Query<ImageUrlQuery>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let url = message_service(&state)
        .image_url(
            query.image_id.as_deref().unwrap_or_default(),
            query.extension.as_deref(),
        )
        .map_err(|e| ApiError::from_app(e, "Failed to generate URL"))?;

    Ok(Json(ImageUrlResponse { url }))
}
