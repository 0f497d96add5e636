//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` plus backend selection, so binary crates
//! open stores through `service::runtime` without wiring backends themselves.

use std::{path::PathBuf, sync::Arc};

use configs::{AppConfig, StorageBackend};
use tracing::info;

use crate::db::{DbMessageStore, DbUserStore};
use crate::file::{FileMessageStore, FileUserStore};
use crate::messages::MessageStore;
use crate::users::UserStore;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<PathBuf> {
    common::env::ensure_env(frontend_dir, data_dir).await
}

/// The stores selected by `storage.backend`.
#[derive(Clone)]
pub struct Stores {
    pub messages: Arc<dyn MessageStore>,
    pub users: Arc<dyn UserStore>,
}

/// Open both stores on the configured backend. The database backend connects and
/// runs pending migrations first.
pub async fn open_stores(cfg: &AppConfig) -> anyhow::Result<Stores> {
    let stores = match cfg.storage.backend {
        StorageBackend::File => {
            let data_dir = ensure_env(&cfg.storage.frontend_dir, &cfg.storage.data_dir).await?;
            Stores {
                messages: FileMessageStore::open_in(&data_dir).await?,
                users: FileUserStore::open_in(&data_dir).await?,
            }
        }
        StorageBackend::Database => {
            ensure_env(&cfg.storage.frontend_dir, &cfg.storage.data_dir).await?;
            let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
            let db = models::db::connect_and_migrate(&db_cfg).await?;
            Stores { messages: DbMessageStore::new(db.clone()), users: DbUserStore::new(db) }
        }
    };
    info!(backend = ?cfg.storage.backend, "stores opened");
    Ok(stores)
}
