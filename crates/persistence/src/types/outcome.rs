//! The result taxonomy of gateway operations.

use std::fmt;

use super::novel::Document;

/// The write outcome reported by the engine for an index, update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// A new document was stored.
    Created,
    /// An existing document was changed.
    Updated,
    /// The document was removed.
    Deleted,
    /// The document did not exist.
    NotFound,
    /// The request left the document unchanged.
    Noop,
    /// A result the gateway does not recognize, kept verbatim.
    Other(String),
}

impl WriteResult {
    /// Parses the engine's `result` string.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "created" => WriteResult::Created,
            "updated" => WriteResult::Updated,
            "deleted" => WriteResult::Deleted,
            "not_found" => WriteResult::NotFound,
            "noop" => WriteResult::Noop,
            _ => WriteResult::Other(value.to_string()),
        }
    }

    /// Returns the wire form of the result.
    pub fn as_str(&self) -> &str {
        match self {
            WriteResult::Created => "created",
            WriteResult::Updated => "updated",
            WriteResult::Deleted => "deleted",
            WriteResult::NotFound => "not_found",
            WriteResult::Noop => "noop",
            WriteResult::Other(value) => value,
        }
    }
}

impl fmt::Display for WriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful round trip through the document gateway.
///
/// Every gateway operation answers with one of these variants; faults travel
/// separately as [`StorageError`](crate::error::StorageError). Callers are expected
/// to match exhaustively so no outcome is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The requested document.
    Found(Document),
    /// The referenced id does not exist.
    NotFound,
    /// A document was created under the engine-assigned id.
    Created(String),
    /// Result of a partial update.
    Updated(WriteResult),
    /// Result of a delete; deleting an absent id yields [`WriteResult::NotFound`].
    Deleted(WriteResult),
    /// Matching documents, in the engine's order.
    SearchResults(Vec<Document>),
}

impl Outcome {
    /// Returns `true` for [`Outcome::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound)
    }
}
