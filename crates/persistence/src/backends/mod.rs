//! Search engine implementations.
//!
//! # Available Engines
//!
//! | Engine | Feature | Description |
//! |--------|---------|-------------|
//! | Memory | always | Process-local storage for tests and development |
//! | Elasticsearch | `elasticsearch` (default) | Remote cluster over the REST API |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bookshelf_persistence::backends::memory::MemoryEngine;
//! use bookshelf_persistence::gateway::DocumentGateway;
//!
//! let gateway = DocumentGateway::new(Arc::new(MemoryEngine::new()));
//! ```

pub mod memory;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
