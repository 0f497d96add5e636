//! Relational stores over sea-orm (Postgres or SQLite).

pub mod message_store;
pub mod user_store;

pub use message_store::DbMessageStore;
pub use user_store::DbUserStore;
