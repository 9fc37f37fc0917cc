//! Application state for the Bookshelf HTTP API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the document gateway, the server configuration, and the
//! collection the routes operate on.

use std::sync::Arc;

use bookshelf_persistence::core::SearchEngine;
use bookshelf_persistence::gateway::DocumentGateway;
use bookshelf_persistence::types::CollectionKey;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `E` - The search engine type (must implement [`SearchEngine`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use bookshelf_persistence::backends::memory::MemoryEngine;
/// use bookshelf_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(Arc::new(MemoryEngine::new()), ServerConfig::for_testing());
/// assert_eq!(state.collection().index(), "book");
/// ```
pub struct AppState<E: ?Sized> {
    /// The document gateway wrapping the engine.
    gateway: DocumentGateway<E>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Collection addressed by every route.
    collection: Arc<CollectionKey>,
}

// Manually implement Clone since E is wrapped in Arc and doesn't need to be Clone
impl<E: ?Sized> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            config: Arc::clone(&self.config),
            collection: Arc::clone(&self.collection),
        }
    }
}

impl<E: SearchEngine + ?Sized> AppState<E> {
    /// Creates a new AppState from an engine and configuration.
    ///
    /// The gateway deadline is taken from [`ServerConfig::operation_timeout`].
    pub fn new(engine: Arc<E>, config: ServerConfig) -> Self {
        let mut gateway = DocumentGateway::new(engine);
        if let Some(timeout) = config.operation_timeout() {
            gateway = gateway.with_operation_timeout(timeout);
        }
        Self::with_gateway(gateway, config)
    }

    /// Creates a new AppState around an already configured gateway.
    pub fn with_gateway(gateway: DocumentGateway<E>, config: ServerConfig) -> Self {
        let collection = config.collection();
        Self {
            gateway,
            config: Arc::new(config),
            collection: Arc::new(collection),
        }
    }

    /// Returns the document gateway.
    pub fn gateway(&self) -> &DocumentGateway<E> {
        &self.gateway
    }

    /// Returns the engine behind the gateway.
    pub fn engine(&self) -> &E {
        self.gateway.engine()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the collection addressed by the routes.
    pub fn collection(&self) -> &CollectionKey {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_persistence::backends::memory::MemoryEngine;
    use std::time::Duration;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MemoryEngine::new()), ServerConfig::default());

        assert_eq!(state.engine().engine_name(), "memory");
        assert_eq!(state.collection(), &CollectionKey::novels());
        assert_eq!(
            state.gateway().operation_timeout(),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_app_state_custom_collection() {
        let config = ServerConfig {
            collection_index: "library".to_string(),
            collection_type: "volume".to_string(),
            operation_timeout_ms: 0,
            ..Default::default()
        };
        let state = AppState::new(Arc::new(MemoryEngine::new()), config);

        assert_eq!(state.collection().index(), "library");
        assert_eq!(state.collection().doc_type(), "volume");
        assert_eq!(state.gateway().operation_timeout(), None);
    }

    #[test]
    fn test_app_state_clone_shares_engine() {
        let state = AppState::new(Arc::new(MemoryEngine::new()), ServerConfig::default());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(state.gateway().engine(), cloned.gateway().engine()));
        assert_eq!(state.config().port, cloned.config().port);
    }
}
