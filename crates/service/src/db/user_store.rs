use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::users::{password::hash_password, NewUser, User, UserStore};

/// Accounts in the `users` table.
///
/// Registration checks for a taken username and inserts under `write_lock`,
/// so racing duplicates in this process report `Conflict`.
pub struct DbUserStore {
    db: DatabaseConnection,
    write_lock: Mutex<()>,
}

impl DbUserStore {
    pub fn new(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { db, write_lock: Mutex::new(()) })
    }
}

#[async_trait]
impl UserStore for DbUserStore {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(models::user::find_all(&self.db).await?.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        Ok(models::user::Entity::find_by_id(id).one(&self.db).await?.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        Ok(models::user::find_by_username(&self.db, username).await?.map(User::from))
    }

    async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        let password_hash = hash_password(&input.password)?;

        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;
        if models::user::find_by_username(&txn, &input.username).await?.is_some() {
            return Err(ServiceError::Conflict(format!("username {} already exists", input.username)));
        }
        let created = models::user::create(&txn, &input.username, &password_hash).await?;
        txn.commit().await?;

        info!(user_id = %created.id, username = %created.username, "user_created");
        Ok(created.into())
    }
}
