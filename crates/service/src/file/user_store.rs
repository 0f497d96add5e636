use std::{path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::json_array_store::JsonArrayStore;
use crate::users::{password::hash_password, NewUser, User, UserStore};

/// Accounts persisted as a JSON array in `users.json`.
pub struct FileUserStore {
    users: JsonArrayStore<User>,
}

impl FileUserStore {
    pub const FILE_NAME: &'static str = "users.json";

    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let users = JsonArrayStore::new(path).await?;
        Ok(Arc::new(Self { users }))
    }

    pub async fn open_in(data_dir: &Path) -> Result<Arc<Self>, ServiceError> {
        Self::new(data_dir.join(Self::FILE_NAME)).await
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let mut users = self.users.load().await?;
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        Ok(self.users.load().await?.into_iter().find(|u| u.id == id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.users.load().await?.into_iter().find(|u| u.username == username))
    }

    async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        // hash before taking the write lock
        let password_hash = hash_password(&input.password)?;
        let username = input.username;
        let user = self
            .users
            .mutate(move |users| {
                if users.iter().any(|u| u.username == username) {
                    return Err(ServiceError::Conflict(format!("username {username} already exists")));
                }
                let user = User { id: Uuid::new_v4(), username, password_hash };
                users.push(user.clone());
                Ok(user)
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, "user_created");
        Ok(user)
    }
}
