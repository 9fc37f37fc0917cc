//! Novel route configuration.
//!
//! Defines all routes of the Bookshelf HTTP API.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use bookshelf_persistence::core::SearchEngine;

use crate::handlers;
use crate::state::AppState;

/// Creates all Bookshelf HTTP API routes.
///
/// Document routes are suffixed with the configured collection, which is
/// `book/novel` by default.
///
/// # Routes
///
/// - `GET /` - Landing route
/// - `GET /health` - Health check
/// - `GET /get/{index}/{type}` - Read
/// - `POST /add/{index}/{type}` - Create
/// - `PUT /update/{index}/{type}` - Update
/// - `DELETE /delete/{index}/{type}` - Delete
/// - `POST /query/{index}/{type}` - Search
pub fn create_routes<E>(state: AppState<E>) -> Router
where
    E: SearchEngine + ?Sized + 'static,
{
    let suffix = format!(
        "{}/{}",
        state.collection().index(),
        state.collection().doc_type()
    );

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler::<E>))
        .route(&format!("/get/{}", suffix), get(handlers::read_handler::<E>))
        .route(&format!("/add/{}", suffix), post(handlers::create_handler::<E>))
        .route(
            &format!("/update/{}", suffix),
            put(handlers::update_handler::<E>),
        )
        .route(
            &format!("/delete/{}", suffix),
            delete(handlers::delete_handler::<E>),
        )
        .route(
            &format!("/query/{}", suffix),
            post(handlers::search_handler::<E>),
        )
        .with_state(state)
}
