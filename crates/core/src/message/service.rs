//! Message service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::MessageError;
use super::types::{
    DEFAULT_EXTENSION, Message, MessageEntry, NewMessage, PostMessageInput, PostedMessage,
    file_extension, object_key,
};
use crate::cdn::CdnUrlBuilder;
use crate::storage::StorageService;

/// Repository trait for message persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait MessageStore: Send + Sync {
    /// Insert a message row and return its ID.
    fn create(
        &self,
        input: NewMessage,
    ) -> impl std::future::Future<Output = Result<i64, MessageError>> + Send;

    /// All messages, newest first.
    fn list_recent(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, MessageError>> + Send;
}

/// Message service orchestrating storage, persistence and URL generation.
pub struct MessageService<R: MessageStore> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
    cdn: Arc<CdnUrlBuilder>,
}

impl<R: MessageStore> MessageService<R> {
    /// Create a new message service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>, cdn: Arc<CdnUrlBuilder>) -> Self {
        Self { storage, repo, cdn }
    }

    /// Post a message: store the image, then insert the row.
    ///
    /// The two writes are not atomic. If the insert fails the image stays in
    /// storage and the error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The message is blank
    /// - No file was sent
    /// - The storage write fails
    /// - The database insert fails
    pub async fn post(&self, input: PostMessageInput) -> Result<PostedMessage, MessageError> {
        let message = input.message.trim();
        if message.is_empty() {
            return Err(MessageError::EmptyMessage);
        }
        let data = input.data.ok_or(MessageError::MissingFile)?;

        let image_id = Uuid::new_v4().to_string();
        let extension = file_extension(input.filename.as_deref());
        let key = object_key(&image_id, &extension);

        self.storage.put(&key, data).await?;
        debug!(s3_key = %key, bucket = %self.storage.bucket(), "Image stored");

        let new_message = NewMessage {
            message: message.to_string(),
            image_id: image_id.clone(),
            file_extension: extension,
            created_at: Utc::now(),
        };

        let id = match self.repo.create(new_message).await {
            Ok(id) => id,
            Err(e) => {
                warn!(s3_key = %key, error = %e, "Message insert failed after image was stored");
                return Err(e);
            }
        };

        Ok(PostedMessage {
            id,
            image_id,
            object_key: key,
        })
    }

    /// List all messages, newest first, with their public image URLs.
    ///
    /// Rows whose URL cannot be built get `image_url: None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub async fn list(&self) -> Result<Vec<MessageEntry>, MessageError> {
        let messages = self.repo.list_recent().await?;

        Ok(messages
            .into_iter()
            .map(|message| {
                let image_url = match self.cdn.url_for(&message.object_key()) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        debug!(id = message.id, error = %e, "No image URL for message");
                        None
                    }
                };

                MessageEntry {
                    id: message.id,
                    message: message.message,
                    image_id: message.image_id,
                    image_url,
                    created_at: message.created_at,
                }
            })
            .collect())
    }

    /// Public URL for an image, `extension` defaulting to `.jpg`.
    ///
    /// # Errors
    ///
    /// Returns an error if `image_id` is empty or no CDN domain is configured.
    pub fn image_url(&self, image_id: &str, extension: Option<&str>) -> Result<String, MessageError> {
        if image_id.is_empty() {
            return Err(MessageError::MissingImageId);
        }

        let key = object_key(image_id, extension.unwrap_or(DEFAULT_EXTENSION));
        Ok(self.cdn.url_for(&key)?)
    }
}
