//! API server state

use std::sync::Arc;

use crate::store::AlbumStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Album store shared by every handler
    pub store: Arc<AlbumStore>,
}

impl AppState {
    pub fn new(store: Arc<AlbumStore>) -> Self {
        Self { store }
    }
}
