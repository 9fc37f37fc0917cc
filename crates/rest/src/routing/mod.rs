//! Route configuration for the Bookshelf HTTP API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod novel_routes;

pub use novel_routes::create_routes;
