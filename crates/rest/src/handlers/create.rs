//! Create handler.
//!
//! `POST /add/book/novel`

use axum::{extract::State, response::Response};
use bookshelf_persistence::core::SearchEngine;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RequestParams, novel};
use crate::responses::outcome_response;
use crate::state::AppState;

/// Handler for storing a new novel.
///
/// # HTTP Request
///
/// `POST /add/book/novel` with `title`, `author`, `word_count` and `public_date`
/// (`yyyy-MM-dd HH:mm:ss`), from the query string or a form body.
///
/// # Response
///
/// - `200 OK` - `{"id": "..."}` with the engine-assigned id
/// - `400 Bad Request` - A parameter is missing or malformed
/// - `500 Internal Server Error` - Serialization or engine fault
pub async fn create_handler<E>(
    State(state): State<AppState<E>>,
    params: RequestParams,
) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    let fields = novel::novel_fields(&params)?;
    debug!(
        index = %state.collection().index(),
        title = %fields.title,
        author = %fields.author,
        "Processing create request"
    );

    let outcome = state.gateway().create(state.collection(), &fields).await?;
    Ok(outcome_response(outcome, state.collection(), ""))
}
