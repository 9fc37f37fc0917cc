//! Novel documents and the collection they live in.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// The fixed format of the `public_date` field (`yyyy-MM-dd HH:mm:ss`).
pub const PUBLIC_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a `public_date` value, enforcing [`PUBLIC_DATE_FORMAT`].
pub fn parse_public_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, PUBLIC_DATE_FORMAT)
}

/// Identifies a collection in the backing engine.
///
/// `index` names the engine index. `doc_type` is the document kind within it;
/// engines without mapping types only use it for display and logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    index: String,
    doc_type: String,
}

impl CollectionKey {
    /// Creates a collection key.
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
        }
    }

    /// The `book/novel` collection served by the HTTP API.
    pub fn novels() -> Self {
        Self::new("book", "novel")
    }

    /// Returns the engine index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the document type.
    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.doc_type)
    }
}

/// A recognized field of a novel document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NovelField {
    /// `title`
    Title,
    /// `author`
    Author,
    /// `word_count`
    WordCount,
    /// `public_date`
    PublicDate,
}

impl NovelField {
    /// All recognized fields, in canonical order.
    pub const ALL: [NovelField; 4] = [
        NovelField::Title,
        NovelField::Author,
        NovelField::WordCount,
        NovelField::PublicDate,
    ];

    /// Returns the stored key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelField::Title => "title",
            NovelField::Author => "author",
            NovelField::WordCount => "word_count",
            NovelField::PublicDate => "public_date",
        }
    }
}

impl fmt::Display for NovelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stored fields of a novel.
///
/// `word_count` is a string-encoded integer and `public_date` follows
/// [`PUBLIC_DATE_FORMAT`]; both are checked where requests are bound, and stored
/// verbatim. Keys outside the recognized set are dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelFields {
    /// Title of the novel.
    #[serde(default)]
    pub title: String,
    /// Author of the novel.
    #[serde(default)]
    pub author: String,
    /// Word count, string-encoded.
    #[serde(default, deserialize_with = "string_or_number")]
    pub word_count: String,
    /// Publication date in [`PUBLIC_DATE_FORMAT`].
    #[serde(default)]
    pub public_date: String,
}

impl NovelFields {
    /// Creates a full set of novel fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        word_count: impl Into<String>,
        public_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            word_count: word_count.into(),
            public_date: public_date.into(),
        }
    }

    /// Returns the value of a field.
    pub fn get(&self, field: NovelField) -> &str {
        match field {
            NovelField::Title => &self.title,
            NovelField::Author => &self.author,
            NovelField::WordCount => &self.word_count,
            NovelField::PublicDate => &self.public_date,
        }
    }
}

/// Accepts `word_count` stored either as a JSON string or as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// A stored novel together with its engine-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Engine-assigned id.
    pub id: String,
    /// Stored fields.
    pub fields: NovelFields,
}

impl Document {
    /// Creates a document.
    pub fn new(id: impl Into<String>, fields: NovelFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
