//! File-backed stores: one JSON array per collection inside the data directory.

pub mod message_store;
pub mod user_store;

pub use message_store::FileMessageStore;
pub use user_store::FileUserStore;
