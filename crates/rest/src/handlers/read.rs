//! Read handler.
//!
//! `GET /get/book/novel?id=...`

use axum::{extract::State, response::Response};
use bookshelf_persistence::core::SearchEngine;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RequestParams, novel};
use crate::responses::outcome_response;
use crate::state::AppState;

/// Handler for reading one novel by id.
///
/// # HTTP Request
///
/// `GET /get/book/novel?id=[id]`
///
/// `id` defaults to the empty string, which never matches a document.
///
/// # Response
///
/// - `200 OK` - The stored fields
/// - `404 Not Found` - No document with that id
/// - `500 Internal Server Error` - The engine failed
pub async fn read_handler<E>(
    State(state): State<AppState<E>>,
    params: RequestParams,
) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    let id = novel::id_or_empty(&params);
    debug!(
        index = %state.collection().index(),
        id = %id,
        "Processing read request"
    );

    let outcome = state.gateway().get(state.collection(), &id).await?;
    Ok(outcome_response(outcome, state.collection(), &id))
}
