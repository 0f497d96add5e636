use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{NewUser, User};

/// Account storage; file-backed or database-backed like the message store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError>;
    /// Hash the password and persist. Duplicate usernames are a `Conflict`.
    async fn create(&self, input: NewUser) -> Result<User, ServiceError>;
}
