use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::messages::{domain::next_timestamp, Message, MessageDraft, MessagePatch, MessageStore};

/// Messages in the `messages` table.
///
/// Each mutation runs in a transaction while holding `write_lock`, which keeps
/// timestamps strictly increasing within this process.
pub struct DbMessageStore {
    db: DatabaseConnection,
    write_lock: Mutex<()>,
}

impl DbMessageStore {
    pub fn new(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { db, write_lock: Mutex::new(()) })
    }
}

#[async_trait]
impl MessageStore for DbMessageStore {
    async fn list(&self) -> Result<Vec<Message>, ServiceError> {
        let rows = models::message::find_all_ordered(&self.db).await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create(&self, draft: MessageDraft) -> Result<Message, ServiceError> {
        draft.validate()?;
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        let latest = models::message::latest_timestamp(&txn).await?;
        let timestamp = next_timestamp(latest.map(|t| t.with_timezone(&Utc)));
        let msg = draft.into_message(Uuid::new_v4(), timestamp, &mut rand::thread_rng());
        let row = models::message::insert(&txn, msg.into()).await?;

        txn.commit().await?;
        info!(id = %row.id, "message_created");
        Ok(row.into())
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: Uuid, patch: MessagePatch) -> Result<Message, ServiceError> {
        patch.validate()?;
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        let mut msg: Message = models::message::find(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("message"))?
            .into();
        patch.apply(&mut msg);
        let row = models::message::update_content(&txn, msg.into()).await?;

        txn.commit().await?;
        info!("message_updated");
        Ok(row.into())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let removed = models::message::delete(&self.db, id).await?;
        info!(removed, "message_deleted");
        Ok(removed)
    }
}
