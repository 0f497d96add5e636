//! Card owner accounts. Persisted alongside messages; no HTTP route uses them.

pub mod domain;
pub mod password;
pub mod store;

pub use domain::{NewUser, User};
pub use store::UserStore;
