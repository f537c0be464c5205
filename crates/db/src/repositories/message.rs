//! Message repository for database operations.
//!
//! Implements message insert and listing using SeaORM.

use std::future::Future;
use std::time::Duration;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::messages;
use msgcreator_core::message::{Message, MessageError, MessageStore, NewMessage};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Message repository implementation.
#[derive(Debug)]
pub struct MessageRepository {
    db: DatabaseConnection,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl MessageRepository {
    /// Create a new message repository with 30 second read and write timeouts.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the read and write timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, read_timeout: Duration, write_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self.write_timeout = write_timeout;
        self
    }
}

impl MessageStore for MessageRepository {
    async fn create(&self, input: NewMessage) -> Result<i64, MessageError> {
        let active_model = messages::ActiveModel {
            message: Set(input.message),
            image_id: Set(input.image_id),
            file_extension: Set(Some(input.file_extension)),
            created_at: Set(Some(input.created_at.naive_utc())),
            ..Default::default()
        };

        let result = with_timeout(
            "write",
            self.write_timeout,
            messages::Entity::insert(active_model).exec(&self.db),
        )
        .await?;

        Ok(result.last_insert_id)
    }

    async fn list_recent(&self) -> Result<Vec<Message>, MessageError> {
        let models = with_timeout(
            "read",
            self.read_timeout,
            messages::Entity::find()
                .order_by_desc(messages::Column::CreatedAt)
                .order_by_desc(messages::Column::Id)
                .all(&self.db),
        )
        .await?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

/// Run a database future under a timeout, flattening both failure kinds
/// into a repository error.
async fn with_timeout<T>(
    kind: &str,
    limit: Duration,
    fut: impl Future<Output = Result<T, DbErr>>,
) -> Result<T, MessageError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(|e| MessageError::repository(e.to_string())),
        Err(_) => Err(MessageError::repository(format!(
            "database {kind} timed out after {limit:?}"
        ))),
    }
}

/// Convert database model to domain model.
fn to_domain(model: messages::Model) -> Message {
    Message {
        id: model.id,
        message: model.message,
        image_id: model.image_id,
        file_extension: model.file_extension,
        created_at: model.created_at.map(|t| t.and_utc()),
    }
}
