//! Delete handler.
//!
//! `DELETE /delete/book/novel?id=...`

use axum::{extract::State, response::Response};
use bookshelf_persistence::core::SearchEngine;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RequestParams, novel};
use crate::responses::outcome_response;
use crate::state::AppState;

/// Handler for removing a novel.
///
/// Deleting a missing document is not an error: the response reports
/// `not_found` with status 200.
///
/// # HTTP Request
///
/// `DELETE /delete/book/novel?id=[id]`
///
/// # Response
///
/// - `200 OK` - `{"result": "deleted"}` or `{"result": "not_found"}`
/// - `400 Bad Request` - No `id` parameter
/// - `500 Internal Server Error` - The engine failed
pub async fn delete_handler<E>(
    State(state): State<AppState<E>>,
    params: RequestParams,
) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    let id = novel::required_id(&params)?;
    debug!(
        index = %state.collection().index(),
        id = %id,
        "Processing delete request"
    );

    let outcome = state.gateway().delete(state.collection(), &id).await?;
    Ok(outcome_response(outcome, state.collection(), &id))
}
