//! Evaluates a [`QueryPlan`] against a stored source document.
//!
//! Approximates the engine's defaults closely enough for tests and local runs:
//! a match predicate is satisfied when the field shares at least one lowercase
//! alphanumeric token with the query text (the `match` query's default `OR`
//! operator), and the range predicate reads `word_count` as an integer.

use serde_json::Value;

use crate::query::{MatchPredicate, QueryPlan, RangePredicate};

/// Splits text into lowercase alphanumeric tokens.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Returns `true` if `source` satisfies every predicate of `plan`.
pub(crate) fn matches_plan(plan: &QueryPlan, source: &Value) -> bool {
    plan.matches().iter().all(|m| matches_text(m, source)) && matches_range(plan.range(), source)
}

fn field_text<'a>(source: &'a Value, field: &str) -> Option<std::borrow::Cow<'a, str>> {
    match source.get(field)? {
        Value::String(s) => Some(s.as_str().into()),
        Value::Number(n) => Some(n.to_string().into()),
        _ => None,
    }
}

fn matches_text(predicate: &MatchPredicate, source: &Value) -> bool {
    let Some(text) = field_text(source, predicate.field.as_str()) else {
        return false;
    };
    let stored: Vec<String> = tokenize(&text).collect();
    tokenize(&predicate.text).any(|t| stored.contains(&t))
}

fn matches_range(range: &RangePredicate, source: &Value) -> bool {
    field_text(source, range.field.as_str())
        .and_then(|text| text.trim().parse::<i64>().ok())
        .is_some_and(|value| range.contains(value))
}
