//! Rendering of gateway outcomes.
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | `Found` | 200 | the stored fields |
//! | `NotFound` | 404 | error body |
//! | `Created` | 200 | `{"id": "..."}` |
//! | `Updated` / `Deleted` | 200 | `{"result": "..."}` |
//! | `SearchResults` | 200 | array of stored fields, engine order |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_persistence::types::{CollectionKey, Outcome};
use serde_json::json;

use crate::error::RestError;

/// Renders `outcome` as an HTTP response.
///
/// `collection` and `id` only feed the message of a 404.
pub fn outcome_response(outcome: Outcome, collection: &CollectionKey, id: &str) -> Response {
    match outcome {
        Outcome::Found(document) => (StatusCode::OK, Json(document.fields)).into_response(),
        Outcome::NotFound => RestError::NotFound {
            collection: format!("{}/{}", collection.index(), collection.doc_type()),
            id: id.to_string(),
        }
        .into_response(),
        Outcome::Created(id) => (StatusCode::OK, Json(json!({ "id": id }))).into_response(),
        Outcome::Updated(result) | Outcome::Deleted(result) => {
            (StatusCode::OK, Json(json!({ "result": result.as_str() }))).into_response()
        }
        Outcome::SearchResults(documents) => {
            let hits: Vec<_> = documents.into_iter().map(|doc| doc.fields).collect();
            (StatusCode::OK, Json(hits)).into_response()
        }
    }
}
