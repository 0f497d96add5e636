use std::sync::Arc;

use service::{runtime::Stores, MessageStore};

/// Shared handler state. Cloned per request; the store itself is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self { Self { messages } }
}

impl From<Stores> for AppState {
    fn from(stores: Stores) -> Self { Self::new(stores.messages) }
}
