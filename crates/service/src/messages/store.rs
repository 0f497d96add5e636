use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{Message, MessageDraft, MessagePatch};

/// Durable message collection. Implementations can be file-backed or database-backed.
///
/// Mutations are serialized by the implementation; readers observe either the
/// state before or after a concurrent write, never a partial one.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Every message, oldest first.
    async fn list(&self) -> Result<Vec<Message>, ServiceError>;
    /// Assign id, timestamp and missing cosmetics, then persist.
    async fn create(&self, draft: MessageDraft) -> Result<Message, ServiceError>;
    /// Merge `patch` onto an existing message.
    async fn update(&self, id: Uuid, patch: MessagePatch) -> Result<Message, ServiceError>;
    /// Returns whether a message was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
