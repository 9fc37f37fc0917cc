//! Update handler.
//!
//! `PUT /update/book/novel`

use axum::{extract::State, response::Response};
use bookshelf_persistence::core::SearchEngine;
use bookshelf_persistence::patch::UpdatePatch;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RequestParams, novel};
use crate::responses::outcome_response;
use crate::state::AppState;

/// Handler for changing some fields of an existing novel.
///
/// # HTTP Request
///
/// `PUT /update/book/novel` with `id` and any of `title`, `author`,
/// `word_count`, `public_date`.
///
/// # Response
///
/// - `200 OK` - `{"result": "updated"}` or `{"result": "noop"}`
/// - `400 Bad Request` - No `id`, no field to change, or a malformed value
/// - `404 Not Found` - No document with that id; nothing is created
/// - `500 Internal Server Error` - The engine failed
pub async fn update_handler<E>(
    State(state): State<AppState<E>>,
    params: RequestParams,
) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    let id = novel::required_id(&params)?;
    let patch = UpdatePatch::compose(novel::novel_changes(&params)?)?;
    debug!(
        index = %state.collection().index(),
        id = %id,
        fields = patch.len(),
        "Processing update request"
    );

    let outcome = state
        .gateway()
        .update(state.collection(), &id, &patch)
        .await?;
    Ok(outcome_response(outcome, state.collection(), &id))
}
