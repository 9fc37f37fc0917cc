//! Axum extractors and parameter binding.
//!
//! - [`RequestParams`] - Merged query-string and form-body parameters
//! - [`novel`] - Binding of parameters to novel inputs

pub mod novel;
mod params;

pub use params::RequestParams;
