//! Query composition.
//!
//! Translates optional filter parameters into an engine-agnostic [`QueryPlan`]:
//! a conjunction of match predicates plus a single numeric range on
//! `word_count`. Nothing here performs I/O; backends render the plan into their
//! own query language (see
//! [`EsQueryBuilder`](crate::backends::elasticsearch::EsQueryBuilder)).
//!
//! # Example
//!
//! ```
//! use bookshelf_persistence::query::NovelQuery;
//!
//! let plan = NovelQuery::new()
//!     .with_author("Herbert")
//!     .with_max_word_count(500)
//!     .build();
//!
//! assert_eq!(plan.matches().len(), 1);
//! assert_eq!(plan.range().gte, 0);
//! assert_eq!(plan.range().lte, Some(500));
//! ```

use crate::types::NovelField;

/// A relevance match on one field. All match predicates of a plan are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPredicate {
    /// The field to match against.
    pub field: NovelField,
    /// The text to match.
    pub text: String,
}

/// An inclusive numeric range applied as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePredicate {
    /// The numeric field.
    pub field: NovelField,
    /// Inclusive lower bound.
    pub gte: i64,
    /// Inclusive upper bound; `None` leaves the range open above.
    pub lte: Option<i64>,
}

impl RangePredicate {
    /// Returns `true` if `value` falls inside the range.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.gte && self.lte.is_none_or(|lte| value <= lte)
    }
}

/// An immutable search plan.
///
/// A plan with no match predicates still carries its range, so the empty plan
/// means "every novel with `word_count >= 0`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    matches: Vec<MatchPredicate>,
    range: RangePredicate,
}

impl QueryPlan {
    /// Returns the match predicates, in the order they were added.
    pub fn matches(&self) -> &[MatchPredicate] {
        &self.matches
    }

    /// Returns the range predicate.
    pub fn range(&self) -> &RangePredicate {
        &self.range
    }
}

impl Default for QueryPlan {
    fn default() -> Self {
        NovelQuery::new().build()
    }
}

/// Filter parameters of a novel search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelQuery {
    /// Keyword filter on `title`.
    pub title: Option<String>,
    /// Keyword filter on `author`.
    pub author: Option<String>,
    /// Inclusive lower bound on `word_count`.
    pub min_word_count: i64,
    /// Inclusive upper bound on `word_count`; ignored unless positive.
    pub max_word_count: Option<i64>,
}

impl NovelQuery {
    /// Creates an unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title filter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author filter.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the lower word-count bound.
    pub fn with_min_word_count(mut self, min: i64) -> Self {
        self.min_word_count = min;
        self
    }

    /// Sets the upper word-count bound.
    pub fn with_max_word_count(mut self, max: i64) -> Self {
        self.max_word_count = Some(max);
        self
    }

    /// Builds the query plan.
    ///
    /// Empty keyword filters are skipped. The author predicate, when present,
    /// precedes the title predicate.
    pub fn build(&self) -> QueryPlan {
        let keywords = [
            (NovelField::Author, self.author.as_deref()),
            (NovelField::Title, self.title.as_deref()),
        ];

        let matches = keywords
            .into_iter()
            .filter_map(|(field, text)| match text {
                Some(text) if !text.is_empty() => Some(MatchPredicate {
                    field,
                    text: text.to_string(),
                }),
                _ => None,
            })
            .collect();

        let range = RangePredicate {
            field: NovelField::WordCount,
            gte: self.min_word_count,
            lte: self.max_word_count.filter(|max| *max > 0),
        };

        QueryPlan { matches, range }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything_from_zero() {
        let plan = NovelQuery::new().build();
        assert!(plan.matches().is_empty());
        assert_eq!(plan.range().field, NovelField::WordCount);
        assert_eq!(plan.range().gte, 0);
        assert_eq!(plan.range().lte, None);
        assert_eq!(plan, QueryPlan::default());
    }

    #[test]
    fn test_keyword_predicates() {
        let plan = NovelQuery::new()
            .with_title("Dune")
            .with_author("Herbert")
            .build();

        assert_eq!(
            plan.matches(),
            &[
                MatchPredicate {
                    field: NovelField::Author,
                    text: "Herbert".to_string(),
                },
                MatchPredicate {
                    field: NovelField::Title,
                    text: "Dune".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_keywords_are_skipped() {
        let plan = NovelQuery::new().with_title("").with_author("Le Guin").build();
        assert_eq!(plan.matches().len(), 1);
        assert_eq!(plan.matches()[0].field, NovelField::Author);

        let plan = NovelQuery::new().with_title("").with_author("").build();
        assert!(plan.matches().is_empty());
    }

    #[test]
    fn test_predicate_count_follows_inputs() {
        let titles = [None, Some(""), Some("Emma")];
        let authors = [None, Some(""), Some("Austen")];

        for title in titles {
            for author in authors {
                let query = NovelQuery {
                    title: title.map(String::from),
                    author: author.map(String::from),
                    ..Default::default()
                };
                let expected = [title, author]
                    .iter()
                    .filter(|v| v.is_some_and(|s| !s.is_empty()))
                    .count();
                assert_eq!(query.build().matches().len(), expected);
            }
        }
    }

    #[test]
    fn test_range_bounds() {
        let plan = NovelQuery::new()
            .with_min_word_count(1000)
            .with_max_word_count(90000)
            .build();
        assert_eq!(plan.range().gte, 1000);
        assert_eq!(plan.range().lte, Some(90000));
    }

    #[test]
    fn test_non_positive_max_is_open_ended() {
        for max in [0, -1, -500] {
            let plan = NovelQuery::new().with_max_word_count(max).build();
            assert_eq!(plan.range().lte, None, "max {} must not bound the range", max);
        }
    }

    #[test]
    fn test_range_contains() {
        let closed = RangePredicate {
            field: NovelField::WordCount,
            gte: 10,
            lte: Some(20),
        };
        assert!(closed.contains(10));
        assert!(closed.contains(20));
        assert!(!closed.contains(9));
        assert!(!closed.contains(21));

        let open = RangePredicate { lte: None, ..closed };
        assert!(open.contains(1_000_000));
    }
}
