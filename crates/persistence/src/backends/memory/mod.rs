//! In-memory engine for tests and local development.

mod engine;
mod matcher;

pub use engine::MemoryEngine;
