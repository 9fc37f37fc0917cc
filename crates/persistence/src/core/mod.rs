//! Core traits for the persistence layer.

mod engine;

pub use engine::{ClusterHealth, ClusterStatus, EngineReply, RefreshPolicy, SearchEngine};
