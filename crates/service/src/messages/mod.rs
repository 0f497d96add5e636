//! The card's message collection: domain types, cosmetic defaults and the
//! storage contract implemented by the file and relational backends.

pub mod cosmetics;
pub mod domain;
pub mod store;

pub use domain::{Message, MessageDraft, MessagePatch};
pub use store::MessageStore;
