//! Request parameter extractor.
//!
//! Collects named parameters from the query string and, for
//! `application/x-www-form-urlencoded` bodies, from the form body.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use url::form_urlencoded;

use crate::error::RestError;

/// Axum extractor for named request parameters.
///
/// Query-string pairs are read first; form-body pairs are applied on top, so a
/// body value wins over a query value with the same name. Bodies with any other
/// content type are ignored.
///
/// # Example
///
/// ```rust,ignore
/// use bookshelf_rest::extractors::RequestParams;
///
/// async fn handler(params: RequestParams) {
///     let id = params.get("id").unwrap_or_default();
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    params: HashMap<String, String>,
}

impl RequestParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates params from name/value pairs; later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        params.extend(pairs);
        params
    }

    fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            self.params.insert(name.into(), value.into());
        }
    }

    /// Returns the value of a parameter, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the value of a parameter, treating an empty value as absent.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }
}

fn is_form_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .is_some_and(|m| {
            m.type_() == mime::APPLICATION_WWW_FORM_URLENCODED.type_()
                && m.subtype() == mime::APPLICATION_WWW_FORM_URLENCODED.subtype()
        })
}

impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = RequestParams::new();

        if let Some(query) = req.uri().query() {
            params.extend(form_urlencoded::parse(query.as_bytes()).into_owned());
        }

        if is_form_content_type(&req) {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| RestError::bad_request(format!("unreadable form body: {}", e)))?;
            params.extend(form_urlencoded::parse(&body).into_owned());
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Method;

    async fn extract(req: Request) -> RequestParams {
        RequestParams::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_query_string_only() {
        let req = Request::builder()
            .uri("/get/book/novel?id=abc&title=Dune%20Messiah")
            .body(Body::empty())
            .unwrap();
        let params = extract(req).await;
        assert_eq!(params.get("id"), Some("abc"));
        assert_eq!(params.get("title"), Some("Dune Messiah"));
        assert_eq!(params.get("author"), None);
    }

    #[tokio::test]
    async fn test_form_body_wins_over_query() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/add/book/novel?title=Query&author=Herbert")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
            .body(Body::from("title=Body+Title&word_count=412"))
            .unwrap();
        let params = extract(req).await;
        assert_eq!(params.get("title"), Some("Body Title"));
        assert_eq!(params.get("author"), Some("Herbert"));
        assert_eq!(params.get("word_count"), Some("412"));
    }

    #[tokio::test]
    async fn test_other_body_types_are_ignored() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/query/book/novel?author=Austen")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"author":"Herbert"}"#))
            .unwrap();
        let params = extract(req).await;
        assert_eq!(params.get("author"), Some("Austen"));
    }

    #[test]
    fn test_empty_value_is_present_but_not_non_empty() {
        let params = RequestParams::from_pairs([("lt_word_count", "")]);
        assert_eq!(params.get("lt_word_count"), Some(""));
        assert_eq!(params.non_empty("lt_word_count"), None);
    }
}
