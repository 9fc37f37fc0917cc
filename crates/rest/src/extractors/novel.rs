//! Binding of request parameters to novel inputs.
//!
//! Each function turns a [`RequestParams`] into the value one route needs and
//! rejects malformed input with [`RestError::BadRequest`].
//!
//! | Parameter | Rule |
//! |-----------|------|
//! | `word_count` | must parse as a signed 64-bit integer; stored as sent |
//! | `public_date` | must match `yyyy-MM-dd HH:mm:ss` |
//! | `gt_word_count` | integer, default 0; an empty value means the default |
//! | `lt_word_count` | optional integer; an empty value means absent |

use bookshelf_persistence::patch::NovelChanges;
use bookshelf_persistence::query::NovelQuery;
use bookshelf_persistence::types::{NovelFields, PUBLIC_DATE_FORMAT, parse_public_date};

use super::RequestParams;
use crate::error::{RestError, RestResult};

/// Returns the `id` parameter, or an empty string when it was not sent.
pub fn id_or_empty(params: &RequestParams) -> String {
    params.get("id").unwrap_or_default().to_string()
}

/// Returns the `id` parameter, rejecting requests that do not send one.
pub fn required_id(params: &RequestParams) -> RestResult<String> {
    params
        .get("id")
        .map(str::to_string)
        .ok_or_else(|| missing("id"))
}

/// Binds the four fields of a new novel. All of them are required.
pub fn novel_fields(params: &RequestParams) -> RestResult<NovelFields> {
    let title = required(params, "title")?;
    let author = required(params, "author")?;
    let word_count = required(params, "word_count")?;
    let public_date = required(params, "public_date")?;

    check_word_count("word_count", word_count)?;
    check_public_date(public_date)?;

    Ok(NovelFields::new(title, author, word_count, public_date))
}

/// Binds the optional fields of an update.
///
/// `title` and `author` are taken as sent, empty values included. A sent
/// `word_count` or `public_date` must be well-formed, so an empty one is
/// rejected.
pub fn novel_changes(params: &RequestParams) -> RestResult<NovelChanges> {
    let word_count = params.get("word_count");
    if let Some(value) = word_count {
        check_word_count("word_count", value)?;
    }

    let public_date = params.get("public_date");
    if let Some(value) = public_date {
        check_public_date(value)?;
    }

    Ok(NovelChanges {
        title: params.get("title").map(str::to_string),
        author: params.get("author").map(str::to_string),
        word_count: word_count.map(str::to_string),
        public_date: public_date.map(str::to_string),
    })
}

/// Binds the filter parameters of a search.
pub fn novel_query(params: &RequestParams) -> RestResult<NovelQuery> {
    let mut query = NovelQuery::new();

    if let Some(title) = params.get("title") {
        query = query.with_title(title);
    }
    if let Some(author) = params.get("author") {
        query = query.with_author(author);
    }
    if let Some(value) = params.non_empty("gt_word_count") {
        query = query.with_min_word_count(parse_int("gt_word_count", value)?);
    }
    if let Some(value) = params.non_empty("lt_word_count") {
        query = query.with_max_word_count(parse_int("lt_word_count", value)?);
    }

    Ok(query)
}

fn required<'a>(params: &'a RequestParams, name: &str) -> RestResult<&'a str> {
    params.get(name).ok_or_else(|| missing(name))
}

fn missing(name: &str) -> RestError {
    RestError::bad_request(format!("required parameter '{}' is missing", name))
}

fn parse_int(name: &str, value: &str) -> RestResult<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        RestError::bad_request(format!(
            "parameter '{}' must be an integer, got '{}'",
            name, value
        ))
    })
}

fn check_word_count(name: &str, value: &str) -> RestResult<()> {
    parse_int(name, value).map(|_| ())
}

fn check_public_date(value: &str) -> RestResult<()> {
    parse_public_date(value).map(|_| ()).map_err(|_| {
        RestError::bad_request(format!(
            "parameter 'public_date' must match '{}', got '{}'",
            PUBLIC_DATE_FORMAT, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_persistence::query::NovelQuery;

    fn params(pairs: &[(&str, &str)]) -> RequestParams {
        RequestParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_id_defaults_to_empty() {
        assert_eq!(id_or_empty(&params(&[])), "");
        assert_eq!(id_or_empty(&params(&[("id", "abc")])), "abc");
    }

    #[test]
    fn test_required_id() {
        assert!(matches!(
            required_id(&params(&[])),
            Err(RestError::BadRequest { .. })
        ));
        assert_eq!(required_id(&params(&[("id", "abc")])).unwrap(), "abc");
    }

    #[test]
    fn test_novel_fields_binds_verbatim() {
        let fields = novel_fields(&params(&[
            ("title", "Dune"),
            ("author", "Herbert"),
            ("word_count", "412"),
            ("public_date", "1965-08-01 00:00:00"),
        ]))
        .unwrap();
        assert_eq!(
            fields,
            NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00")
        );
    }

    #[test]
    fn test_novel_fields_rejects_missing_and_malformed() {
        let base = [
            ("title", "Dune"),
            ("author", "Herbert"),
            ("word_count", "412"),
            ("public_date", "1965-08-01 00:00:00"),
        ];

        for skip in 0..base.len() {
            let partial: Vec<_> = base
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, pair)| *pair)
                .collect();
            assert!(novel_fields(&params(&partial)).is_err());
        }

        let mut bad_count = base;
        bad_count[2] = ("word_count", "many");
        assert!(novel_fields(&params(&bad_count)).is_err());

        let mut bad_date = base;
        bad_date[3] = ("public_date", "1965-08-01");
        assert!(novel_fields(&params(&bad_date)).is_err());
    }

    #[test]
    fn test_novel_changes_only_sent_fields() {
        let changes = novel_changes(&params(&[("id", "x"), ("author", "Frank Herbert")])).unwrap();
        assert_eq!(
            changes,
            NovelChanges {
                author: Some("Frank Herbert".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_novel_changes_rejects_empty_typed_values() {
        let err = novel_changes(&params(&[("id", "x"), ("word_count", "")])).unwrap_err();
        assert!(
            matches!(&err, RestError::BadRequest { message } if message.contains("word_count"))
        );

        let err = novel_changes(&params(&[("id", "x"), ("public_date", "")])).unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }

    #[test]
    fn test_novel_changes_rejects_malformed() {
        assert!(novel_changes(&params(&[("word_count", "4.5")])).is_err());
        assert!(novel_changes(&params(&[("public_date", "yesterday")])).is_err());
    }

    #[test]
    fn test_novel_query_defaults() {
        let query = novel_query(&params(&[])).unwrap();
        assert_eq!(query, NovelQuery::new());

        let empty_bounds =
            novel_query(&params(&[("gt_word_count", ""), ("lt_word_count", "")])).unwrap();
        assert_eq!(empty_bounds, NovelQuery::new());
    }

    #[test]
    fn test_novel_query_binds_bounds() {
        let query = novel_query(&params(&[
            ("author", "Herbert"),
            ("gt_word_count", "100"),
            ("lt_word_count", "0"),
        ]))
        .unwrap();
        assert_eq!(
            query,
            NovelQuery::new()
                .with_author("Herbert")
                .with_min_word_count(100)
                .with_max_word_count(0)
        );
        assert!(query.build().range().lte.is_none());
    }

    #[test]
    fn test_novel_query_rejects_non_integer() {
        assert!(novel_query(&params(&[("gt_word_count", "lots")])).is_err());
        assert!(novel_query(&params(&[("lt_word_count", "1e3")])).is_err());
    }
}
