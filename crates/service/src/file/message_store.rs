use std::{path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::messages::{domain::next_timestamp, Message, MessageDraft, MessagePatch, MessageStore};
use crate::storage::json_array_store::JsonArrayStore;

/// Messages persisted as a JSON array in `messages.json`.
pub struct FileMessageStore {
    messages: JsonArrayStore<Message>,
}

impl FileMessageStore {
    pub const FILE_NAME: &'static str = "messages.json";

    /// Open (or create) the store at an explicit file path.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let messages = JsonArrayStore::new(path).await?;
        Ok(Arc::new(Self { messages }))
    }

    /// Open `messages.json` inside `data_dir`.
    pub async fn open_in(data_dir: &Path) -> Result<Arc<Self>, ServiceError> {
        Self::new(data_dir.join(Self::FILE_NAME)).await
    }

    pub fn path(&self) -> &Path { self.messages.path() }
}

#[async_trait]
impl MessageStore for FileMessageStore {
    async fn list(&self) -> Result<Vec<Message>, ServiceError> {
        let mut messages = self.messages.load().await?;
        // stable: records imported with equal timestamps keep file order
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create(&self, draft: MessageDraft) -> Result<Message, ServiceError> {
        draft.validate()?;
        let created = self
            .messages
            .mutate(move |items| {
                let mut id = Uuid::new_v4();
                while items.iter().any(|m| m.id == id) {
                    id = Uuid::new_v4();
                }
                let timestamp = next_timestamp(items.iter().map(|m| m.timestamp).max());
                let msg = draft.into_message(id, timestamp, &mut rand::thread_rng());
                items.push(msg.clone());
                Ok(msg)
            })
            .await?;
        info!(id = %created.id, "message_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: Uuid, patch: MessagePatch) -> Result<Message, ServiceError> {
        patch.validate()?;
        let updated = self
            .messages
            .mutate(move |items| {
                let existing = items
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or_else(|| ServiceError::not_found("message"))?;
                patch.apply(existing);
                Ok(existing.clone())
            })
            .await?;
        info!("message_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let removed = self
            .messages
            .mutate(move |items| {
                let before = items.len();
                items.retain(|m| m.id != id);
                Ok(items.len() != before)
            })
            .await?;
        info!(removed, "message_deleted");
        Ok(removed)
    }
}
