//! Bookshelf Persistence Layer
//!
//! This crate provides query composition and document access for the bookshelf
//! novel store. Documents live in a search engine; this crate owns every
//! interaction with it and reports results through a small, closed taxonomy.
//!
//! # Features
//!
//! - `elasticsearch` (default) - Elasticsearch engine via the official client
//!
//! The in-memory engine is always available.
//!
//! # Architecture
//!
//! - [`query`] - Translates filter parameters into an engine-agnostic [`QueryPlan`]
//! - [`patch`] - Translates optional field values into a non-empty [`UpdatePatch`]
//! - [`gateway`] - Executes operations and maps engine replies to [`Outcome`]s
//! - [`core`] - The [`SearchEngine`] capability implemented by each engine
//! - [`backends`] - Engine implementations
//! - [`types`] - Documents, outcomes and pagination
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use bookshelf_persistence::backends::memory::MemoryEngine;
//! use bookshelf_persistence::query::NovelQuery;
//! use bookshelf_persistence::types::{CollectionKey, NovelFields, Outcome, PageRequest};
//! use bookshelf_persistence::DocumentGateway;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let gateway = DocumentGateway::new(Arc::new(MemoryEngine::new()));
//! let novels = CollectionKey::novels();
//!
//! let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");
//! gateway.create(&novels, &fields).await.unwrap();
//!
//! let plan = NovelQuery::new().with_author("Herbert").build();
//! let Outcome::SearchResults(docs) = gateway
//!     .search(&novels, &plan, PageRequest::default())
//!     .await
//!     .unwrap()
//! else {
//!     panic!("expected search results");
//! };
//! assert_eq!(docs[0].fields, fields);
//! # });
//! ```
//!
//! # Outcomes and faults
//!
//! A missing document is a normal [`Outcome::NotFound`], never an error. Faults
//! are [`StorageError`]s; [`StorageError::outcome_unknown`] flags writes whose
//! effect cannot be known because the engine did not answer in time or its
//! answer was lost.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod gateway;
pub mod patch;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{Operation, StorageError, StorageResult, TransportError};
pub use gateway::DocumentGateway;
pub use patch::{NovelChanges, UpdatePatch};
pub use query::{NovelQuery, QueryPlan};
pub use types::{CollectionKey, Document, NovelFields, Outcome, PageRequest, WriteResult};

// Re-export core traits
pub use core::{ClusterHealth, RefreshPolicy, SearchEngine};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
