//! `SearchEngine` implementation for Elasticsearch.

use async_trait::async_trait;
use elasticsearch::cluster::ClusterHealthParts;
use elasticsearch::http::response::Response;
use elasticsearch::{DeleteParts, GetParts, IndexParts, SearchParts, UpdateParts};
use serde_json::{Value, json};

use crate::core::{ClusterHealth, ClusterStatus, EngineReply, SearchEngine};
use crate::error::{EngineResult, TransportError};
use crate::query::QueryPlan;
use crate::types::{CollectionKey, PageRequest};

use super::backend::ElasticsearchEngine;
use super::query_builder::{EsQueryBuilder, SEARCH_TYPE};
use super::schema;

/// Converts a client error into a [`TransportError`].
///
/// Only a client that failed before sending proves the engine never saw the
/// request; anything later is reported as a lost response.
pub(crate) fn send_error(e: elasticsearch::Error) -> TransportError {
    let engine = "elasticsearch".to_string();
    let message = e.to_string();
    if e.is_timeout() {
        TransportError::Timeout { engine, message }
    } else if never_sent(&e) {
        TransportError::ConnectionFailed { engine, message }
    } else {
        TransportError::ResponseLost { engine, message }
    }
}

fn never_sent(e: &elasticsearch::Error) -> bool {
    let Some(source) = std::error::Error::source(e) else {
        return true;
    };
    match source.downcast_ref::<reqwest::Error>() {
        Some(http) => http.is_connect() || http.is_builder(),
        None => source.downcast_ref::<std::io::Error>().is_none(),
    }
}

/// Reads status and body of a response. An empty body becomes `Value::Null`.
///
/// The engine has already answered at this point, so a body that cannot be
/// read or decoded is a lost response.
async fn read_reply(response: Response) -> EngineResult<EngineReply> {
    let status = response.status_code().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| TransportError::ResponseLost {
            engine: "elasticsearch".to_string(),
            message: format!("status {} with unreadable body: {}", status, e),
        })?;

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).map_err(|e| TransportError::ResponseLost {
            engine: "elasticsearch".to_string(),
            message: format!("status {} with non-JSON body: {}", status, e),
        })?
    };

    Ok(EngineReply::new(status, body))
}

#[async_trait]
impl SearchEngine for ElasticsearchEngine {
    fn engine_name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn health_check(&self) -> EngineResult<ClusterHealth> {
        let response = self
            .client()
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(send_error)?;

        let reply = read_reply(response).await?;
        if !reply.is_success() {
            return Err(TransportError::EngineFault {
                engine: "elasticsearch".to_string(),
                status: reply.status,
                reason: reply.error_reason(),
            });
        }

        let cluster_name = reply
            .body
            .get("cluster_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| TransportError::malformed("elasticsearch", "health has no cluster_name"))?
            .to_string();
        let status = reply
            .body
            .get("status")
            .and_then(|s| s.as_str())
            .map(ClusterStatus::parse)
            .unwrap_or(ClusterStatus::Unknown);

        let expected = &self.config().cluster_name;
        if !expected.is_empty() && *expected != cluster_name {
            return Err(TransportError::ClusterMismatch {
                engine: "elasticsearch".to_string(),
                expected: expected.clone(),
                actual: cluster_name,
            });
        }

        Ok(ClusterHealth {
            cluster_name,
            status,
        })
    }

    async fn initialize(&self, collection: &CollectionKey) -> EngineResult<()> {
        schema::ensure_index(self, collection).await
    }

    async fn get(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply> {
        let response = self
            .client()
            .get(GetParts::IndexId(collection.index(), id))
            .send()
            .await
            .map_err(send_error)?;

        read_reply(response).await
    }

    async fn index(
        &self,
        collection: &CollectionKey,
        source: Value,
    ) -> EngineResult<EngineReply> {
        let mut request = self
            .client()
            .index(IndexParts::Index(collection.index()))
            .body(source);
        if let Some(refresh) = self.config().refresh_param() {
            request = request.refresh(refresh);
        }

        let response = request.send().await.map_err(send_error)?;
        read_reply(response).await
    }

    async fn update(
        &self,
        collection: &CollectionKey,
        id: &str,
        partial: Value,
    ) -> EngineResult<EngineReply> {
        // A plain `doc` merge; without `doc_as_upsert` a missing id is a 404.
        let mut request = self
            .client()
            .update(UpdateParts::IndexId(collection.index(), id))
            .body(json!({ "doc": partial }));
        if let Some(refresh) = self.config().refresh_param() {
            request = request.refresh(refresh);
        }

        let response = request.send().await.map_err(send_error)?;
        read_reply(response).await
    }

    async fn delete(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply> {
        let mut request = self
            .client()
            .delete(DeleteParts::IndexId(collection.index(), id));
        if let Some(refresh) = self.config().refresh_param() {
            request = request.refresh(refresh);
        }

        let response = request.send().await.map_err(send_error)?;
        read_reply(response).await
    }

    async fn search(
        &self,
        collection: &CollectionKey,
        plan: &QueryPlan,
        page: PageRequest,
    ) -> EngineResult<EngineReply> {
        let query = EsQueryBuilder::new(collection.index()).build(plan, page);

        tracing::debug!(
            index = %query.index,
            body = %query.body,
            "Elasticsearch search"
        );

        let response = self
            .client()
            .search(SearchParts::Index(&[&query.index]))
            .search_type(SEARCH_TYPE)
            .body(query.body)
            .send()
            .await
            .map_err(send_error)?;

        read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_failure_is_lost_response() {
        let err = send_error(elasticsearch::Error::from(std::io::Error::other(
            "connection reset by peer",
        )));
        assert!(matches!(err, TransportError::ResponseLost { .. }));
        assert!(err.is_ambiguous());
    }

    #[test]
    fn test_payload_failure_is_not_sent() {
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err = send_error(elasticsearch::Error::from(json_err));
        assert!(matches!(err, TransportError::ConnectionFailed { .. }));
        assert!(!err.is_ambiguous());
    }
}
