//! Shared application state for all routes. Holds no mutable data; the store opens a fresh
//! connection per operation.

use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    pub fn new(store: impl StudentStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
