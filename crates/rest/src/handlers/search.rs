//! Search handler.
//!
//! `POST /query/book/novel`

use axum::{extract::State, response::Response};
use bookshelf_persistence::core::SearchEngine;
use bookshelf_persistence::types::PageRequest;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RequestParams, novel};
use crate::responses::outcome_response;
use crate::state::AppState;

/// Handler for filtering novels.
///
/// Every non-empty `title`/`author` must match, and `word_count` must lie in
/// `[gt_word_count, lt_word_count]`. An absent or zero `lt_word_count` leaves
/// the range open above. The first page of ten hits is returned in engine order.
///
/// # HTTP Request
///
/// `POST /query/book/novel` with optional `title`, `author`, `gt_word_count`
/// (default 0) and `lt_word_count`.
///
/// # Response
///
/// - `200 OK` - Array of matching documents' fields
/// - `400 Bad Request` - A bound is not an integer
/// - `500 Internal Server Error` - The engine failed
pub async fn search_handler<E>(
    State(state): State<AppState<E>>,
    params: RequestParams,
) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    let plan = novel::novel_query(&params)?.build();
    debug!(
        index = %state.collection().index(),
        matches = plan.matches().len(),
        gte = plan.range().gte,
        lte = ?plan.range().lte,
        "Processing search request"
    );

    let outcome = state
        .gateway()
        .search(state.collection(), &plan, PageRequest::default())
        .await?;
    Ok(outcome_response(outcome, state.collection(), ""))
}
