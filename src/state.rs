use std::sync::Arc;

use crate::store::Store;

/// Shared application state: the storage collaborator is injected here and
/// threaded to handlers and the auth guard, never reached through a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
