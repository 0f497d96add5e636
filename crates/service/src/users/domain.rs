use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ServiceError, ValidationErrors};

/// Stored account. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errs = ValidationErrors::default();
        if self.username.trim().is_empty() {
            errs.push("username", "must not be empty");
        }
        if self.password.len() < 8 {
            errs.push("password", "too short (>=8)");
        }
        errs.into_result()
    }
}

impl From<models::user::Model> for User {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, username: u.username, password_hash: u.password_hash }
    }
}
