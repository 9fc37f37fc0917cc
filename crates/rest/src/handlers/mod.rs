//! HTTP request handlers for the novel routes.
//!
//! Handlers are generic over the [`SearchEngine`](bookshelf_persistence::core::SearchEngine)
//! behind the gateway.
//!
//! - [`read`] - `GET /get/book/novel`
//! - [`create`] - `POST /add/book/novel`
//! - [`update`] - `PUT /update/book/novel`
//! - [`delete`] - `DELETE /delete/book/novel`
//! - [`search`] - `POST /query/book/novel`
//! - [`health`] - `GET /` and `GET /health`

pub mod create;
pub mod delete;
pub mod health;
pub mod read;
pub mod search;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, index_handler};
pub use read::read_handler;
pub use search::search_handler;
pub use update::update_handler;
