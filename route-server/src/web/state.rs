//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;

/// Shared application state.
///
/// The network is read-only, so every request shares it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded station graph
    pub network: Arc<Network>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network) -> Self {
        Self {
            network: Arc::new(network),
        }
    }
}
