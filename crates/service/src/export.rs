//! One-shot copy of database contents into the file backend layout.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::ServiceError;
use crate::file::{FileMessageStore, FileUserStore};
use crate::messages::{Message, MessageStore};
use crate::storage::json_array_store::JsonArrayStore;
use crate::users::{User, UserStore};

/// Counts of records written by [`export_to_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub messages: usize,
    pub users: usize,
}

/// Write every message and user from the given stores into `data_dir`,
/// replacing `messages.json` and `users.json` wholesale.
pub async fn export_to_files(
    messages: &dyn MessageStore,
    users: &dyn UserStore,
    data_dir: &Path,
) -> Result<ExportReport, ServiceError> {
    let all_messages = messages.list().await?;
    let all_users = users.list().await?;
    let report = ExportReport { messages: all_messages.len(), users: all_users.len() };

    JsonArrayStore::<Message>::new(data_dir.join(FileMessageStore::FILE_NAME))
        .await?
        .replace_all(all_messages)
        .await?;
    JsonArrayStore::<User>::new(data_dir.join(FileUserStore::FILE_NAME))
        .await?
        .replace_all(all_users)
        .await?;

    info!(messages = report.messages, users = report.users, data_dir = %data_dir.display(), "export_complete");
    Ok(report)
}
