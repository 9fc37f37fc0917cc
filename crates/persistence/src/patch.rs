//! Partial update composition.
//!
//! An [`UpdatePatch`] holds exactly the fields a caller supplied, in canonical
//! field order. It can only be built through [`UpdatePatch::compose`], which
//! refuses to build an empty patch, so every patch that reaches the gateway
//! changes at least one field.

use serde_json::{Map, Value};

use crate::error::{StorageError, StorageResult};
use crate::types::NovelField;

/// Optional new values for each updatable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelChanges {
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New word count (string-encoded integer).
    pub word_count: Option<String>,
    /// New publication date, already validated against the date format.
    pub public_date: Option<String>,
}

/// A non-empty partial document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePatch {
    entries: Vec<(NovelField, String)>,
}

impl UpdatePatch {
    /// Composes a patch from the supplied values.
    ///
    /// Values are taken verbatim. Fails with [`StorageError::EmptyPatch`] when no
    /// field was supplied.
    pub fn compose(changes: NovelChanges) -> StorageResult<Self> {
        let NovelChanges {
            title,
            author,
            word_count,
            public_date,
        } = changes;

        let entries: Vec<_> = [
            (NovelField::Title, title),
            (NovelField::Author, author),
            (NovelField::WordCount, word_count),
            (NovelField::PublicDate, public_date),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect();

        if entries.is_empty() {
            return Err(StorageError::EmptyPatch);
        }

        Ok(Self { entries })
    }

    /// Returns the patched fields and their new values.
    pub fn entries(&self) -> &[(NovelField, String)] {
        &self.entries
    }

    /// Returns the new value of `field`, if the patch changes it.
    pub fn get(&self, field: NovelField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of patched fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the patch as a partial JSON document.
    pub fn to_document(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }
}
