//! Service layer for the greeting card.
//! - Domain types and validation for messages and users.
//! - Store traits with file-backed and sea-orm backends.
//! - Export from the database into the file layout.

pub mod errors;
pub mod messages;
pub mod users;
pub mod storage;
pub mod file;
pub mod db;
pub mod export;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use messages::{Message, MessageDraft, MessagePatch, MessageStore};
pub use users::{NewUser, User, UserStore};
