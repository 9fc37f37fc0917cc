//! Elasticsearch Query DSL builder.
//!
//! Renders a [`QueryPlan`] as a `bool` query: match predicates become scored
//! `must` clauses and the word-count range becomes a non-scoring `filter`.

use elasticsearch::params::SearchType;
use serde_json::{Map, Value, json};

use crate::query::{QueryPlan, RangePredicate};
use crate::types::PageRequest;

/// Search type used for every novel search.
///
/// Distributed term frequencies keep scores comparable across shards.
pub const SEARCH_TYPE: SearchType = SearchType::DfsQueryThenFetch;

/// A complete Elasticsearch query body ready to be sent.
#[derive(Debug, Clone)]
pub struct EsQuery {
    /// The complete query body.
    pub body: Value,
    /// The index to search.
    pub index: String,
}

/// Builds Elasticsearch queries from query plans.
pub struct EsQueryBuilder<'a> {
    index: &'a str,
}

impl<'a> EsQueryBuilder<'a> {
    /// Creates a new query builder for `index`.
    pub fn new(index: &'a str) -> Self {
        Self { index }
    }

    /// Builds a complete ES query from a plan and a page request.
    pub fn build(&self, plan: &QueryPlan, page: PageRequest) -> EsQuery {
        let must_clauses: Vec<Value> = plan
            .matches()
            .iter()
            .map(|m| json!({ "match": { m.field.as_str(): m.text } }))
            .collect();

        let filter_clauses = vec![range_clause(plan.range())];

        let mut bool_query = json!({
            "filter": filter_clauses,
        });

        if !must_clauses.is_empty() {
            bool_query["must"] = json!(must_clauses);
        }

        let body = json!({
            "query": { "bool": bool_query },
            "from": page.from,
            "size": page.size,
        });

        EsQuery {
            body,
            index: self.index.to_string(),
        }
    }
}

fn range_clause(range: &RangePredicate) -> Value {
    let mut bounds = Map::new();
    bounds.insert("gte".to_string(), json!(range.gte));
    if let Some(lte) = range.lte {
        bounds.insert("lte".to_string(), json!(lte));
    }
    json!({ "range": { range.field.as_str(): bounds } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NovelQuery;

    #[test]
    fn test_empty_plan_filters_on_lower_bound_only() {
        let query = EsQueryBuilder::new("book").build(&QueryPlan::default(), PageRequest::default());

        assert_eq!(query.index, "book");
        assert_eq!(
            query.body,
            json!({
                "query": {
                    "bool": {
                        "filter": [{ "range": { "word_count": { "gte": 0 } } }]
                    }
                },
                "from": 0,
                "size": 10
            })
        );
    }

    #[test]
    fn test_full_plan() {
        let plan = NovelQuery::new()
            .with_title("Dune")
            .with_author("Herbert")
            .with_min_word_count(100)
            .with_max_word_count(500)
            .build();
        let query = EsQueryBuilder::new("book").build(&plan, PageRequest::new(20, 5));

        assert_eq!(
            query.body["query"]["bool"]["must"],
            json!([
                { "match": { "author": "Herbert" } },
                { "match": { "title": "Dune" } }
            ])
        );
        assert_eq!(
            query.body["query"]["bool"]["filter"],
            json!([{ "range": { "word_count": { "gte": 100, "lte": 500 } } }])
        );
        assert_eq!(query.body["from"], 20);
        assert_eq!(query.body["size"], 5);
    }

    #[test]
    fn test_zero_max_leaves_range_open() {
        let plan = NovelQuery::new().with_max_word_count(0).build();
        let query = EsQueryBuilder::new("book").build(&plan, PageRequest::default());

        let bounds = &query.body["query"]["bool"]["filter"][0]["range"]["word_count"];
        assert_eq!(bounds["gte"], 0);
        assert!(bounds.get("lte").is_none());
    }
}
