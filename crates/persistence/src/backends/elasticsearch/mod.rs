//! Elasticsearch engine.
//!
//! Talks to a cluster over the REST API through the official `elasticsearch`
//! client. One index per collection; the collection's document type is not sent
//! since Elasticsearch 8 has no mapping types.
//!
//! # Example
//!
//! ```ignore
//! use bookshelf_persistence::backends::elasticsearch::{ElasticsearchConfig, ElasticsearchEngine};
//! use bookshelf_persistence::core::SearchEngine;
//! use bookshelf_persistence::types::CollectionKey;
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let engine = ElasticsearchEngine::new(config)?;
//! engine.initialize(&CollectionKey::novels()).await?;
//! ```

mod backend;
mod engine;
mod query_builder;
mod schema;

pub use backend::{ElasticsearchAuth, ElasticsearchConfig, ElasticsearchEngine};
pub use query_builder::{EsQuery, EsQueryBuilder, SEARCH_TYPE};
pub use schema::{PUBLIC_DATE_ES_FORMAT, create_index_mapping};
