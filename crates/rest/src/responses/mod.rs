//! Response formatting for the Bookshelf HTTP API.
//!
//! - [`outcome`] - Rendering of gateway outcomes

pub mod outcome;

pub use outcome::outcome_response;
