//! The document access gateway.
//!
//! [`DocumentGateway`] is the only component that talks to the search engine. It
//! issues exactly one engine call per operation and maps the raw reply onto an
//! [`Outcome`]. Anything that prevents a usable reply is returned as a
//! [`StorageError`] tagged with the [`Operation`] that failed; nothing is
//! retried here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bookshelf_persistence::backends::memory::MemoryEngine;
//! use bookshelf_persistence::gateway::DocumentGateway;
//! use bookshelf_persistence::types::{CollectionKey, NovelFields, Outcome};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let gateway = DocumentGateway::new(Arc::new(MemoryEngine::new()));
//! let novels = CollectionKey::novels();
//!
//! let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");
//! let Outcome::Created(id) = gateway.create(&novels, &fields).await.unwrap() else {
//!     panic!("expected a created document");
//! };
//!
//! match gateway.get(&novels, &id).await.unwrap() {
//!     Outcome::Found(doc) => assert_eq!(doc.fields, fields),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{ClusterHealth, EngineReply, SearchEngine};
use crate::error::{EngineResult, Operation, StorageError, StorageResult, TransportError};
use crate::patch::UpdatePatch;
use crate::query::QueryPlan;
use crate::types::{
    CollectionKey, Document, NovelFields, Outcome, PageRequest, WriteResult,
};

/// Executes document operations against a shared [`SearchEngine`].
///
/// The gateway holds no per-request state; clones share the same engine and can
/// be used from any number of tasks.
pub struct DocumentGateway<E: ?Sized> {
    engine: Arc<E>,
    operation_timeout: Option<Duration>,
}

impl<E: ?Sized> Clone for DocumentGateway<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            operation_timeout: self.operation_timeout,
        }
    }
}

impl<E: ?Sized> std::fmt::Debug for DocumentGateway<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentGateway")
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

impl<E: SearchEngine + ?Sized> DocumentGateway<E> {
    /// Creates a gateway over `engine` with no caller-side deadline.
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            operation_timeout: None,
        }
    }

    /// Bounds every engine call by `timeout`.
    ///
    /// When the deadline elapses the call is abandoned and reported as
    /// [`StorageError::Interrupted`]. An abandoned write may still be applied by
    /// the engine.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Returns the shared engine.
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Returns the caller-side deadline, if any.
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }

    /// Reports engine health.
    pub async fn health(&self) -> StorageResult<ClusterHealth> {
        self.call(Operation::Health, self.engine.health_check())
            .await
    }

    /// Fetches a document by id.
    ///
    /// An empty id is answered with [`Outcome::NotFound`] without contacting the
    /// engine.
    pub async fn get(&self, collection: &CollectionKey, id: &str) -> StorageResult<Outcome> {
        if id.is_empty() {
            debug!(collection = %collection, "Empty id, skipping get");
            return Ok(Outcome::NotFound);
        }

        let reply = self
            .call(Operation::Get, self.engine.get(collection, id))
            .await?;

        self.interpret(Operation::Get, map_get_reply(self.engine_name(), id, reply))
    }

    /// Stores a new document and returns its engine-assigned id.
    pub async fn create(
        &self,
        collection: &CollectionKey,
        fields: &NovelFields,
    ) -> StorageResult<Outcome> {
        let source = serde_json::to_value(fields).map_err(|e| StorageError::Serialization {
            operation: Operation::Create,
            source: e,
        })?;

        let reply = self
            .call(Operation::Create, self.engine.index(collection, source))
            .await?;

        let outcome = self.interpret(Operation::Create, map_index_reply(self.engine_name(), reply))?;
        if let Outcome::Created(id) = &outcome {
            debug!(collection = %collection, id = %id, "Created document");
        }
        Ok(outcome)
    }

    /// Merges `patch` into the document `id`.
    ///
    /// Never creates a document: an absent id, including the empty id, yields
    /// [`Outcome::NotFound`].
    pub async fn update(
        &self,
        collection: &CollectionKey,
        id: &str,
        patch: &UpdatePatch,
    ) -> StorageResult<Outcome> {
        if patch.is_empty() {
            return Err(StorageError::EmptyPatch);
        }
        if id.is_empty() {
            debug!(collection = %collection, "Empty id, skipping update");
            return Ok(Outcome::NotFound);
        }

        let reply = self
            .call(
                Operation::Update,
                self.engine.update(collection, id, patch.to_document()),
            )
            .await?;

        self.interpret(Operation::Update, map_update_reply(self.engine_name(), reply))
    }

    /// Deletes the document `id`.
    ///
    /// Deleting an absent id is not an error: it yields
    /// `Deleted(WriteResult::NotFound)`.
    pub async fn delete(&self, collection: &CollectionKey, id: &str) -> StorageResult<Outcome> {
        if id.is_empty() {
            debug!(collection = %collection, "Empty id, nothing to delete");
            return Ok(Outcome::Deleted(WriteResult::NotFound));
        }

        let reply = self
            .call(Operation::Delete, self.engine.delete(collection, id))
            .await?;

        self.interpret(Operation::Delete, map_delete_reply(self.engine_name(), reply))
    }

    /// Runs `plan` and returns one page of matching documents in engine order.
    pub async fn search(
        &self,
        collection: &CollectionKey,
        plan: &QueryPlan,
        page: PageRequest,
    ) -> StorageResult<Outcome> {
        let reply = self
            .call(Operation::Search, self.engine.search(collection, plan, page))
            .await?;

        let outcome = self.interpret(Operation::Search, map_search_reply(self.engine_name(), reply))?;
        if let Outcome::SearchResults(docs) = &outcome {
            debug!(
                collection = %collection,
                predicates = plan.matches().len(),
                from = page.from,
                size = page.size,
                hits = docs.len(),
                "Search completed"
            );
        }
        Ok(outcome)
    }

    fn engine_name(&self) -> &'static str {
        self.engine.engine_name()
    }

    /// Awaits one engine call, applying the caller-side deadline.
    async fn call<T, F>(&self, operation: Operation, fut: F) -> StorageResult<T>
    where
        F: Future<Output = EngineResult<T>>,
    {
        let result = match self.operation_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => {
                    let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                    warn!(
                        operation = %operation,
                        timeout_ms,
                        outcome_unknown = operation.is_write(),
                        "Engine call interrupted"
                    );
                    return Err(StorageError::Interrupted {
                        operation,
                        timeout_ms,
                    });
                }
            },
            None => fut.await,
        };

        result.map_err(|source| self.transport_fault(operation, source))
    }

    fn interpret(
        &self,
        operation: Operation,
        mapped: EngineResult<Outcome>,
    ) -> StorageResult<Outcome> {
        mapped.map_err(|source| self.transport_fault(operation, source))
    }

    fn transport_fault(&self, operation: Operation, source: TransportError) -> StorageError {
        let err = StorageError::Transport { operation, source };
        warn!(
            engine = self.engine_name(),
            operation = %operation,
            outcome_unknown = err.outcome_unknown(),
            error = %err,
            "Engine call failed"
        );
        err
    }
}

fn unexpected_status(engine: &str, reply: &EngineReply) -> TransportError {
    TransportError::EngineFault {
        engine: engine.to_string(),
        status: reply.status,
        reason: reply.error_reason(),
    }
}

fn decode_source(engine: &str, source: Option<&Value>) -> EngineResult<NovelFields> {
    let source = source.ok_or_else(|| TransportError::malformed(engine, "missing _source"))?;
    serde_json::from_value(source.clone())
        .map_err(|e| TransportError::malformed(engine, format!("undecodable _source: {}", e)))
}

fn result_of(engine: &str, reply: &EngineReply) -> EngineResult<WriteResult> {
    reply
        .body
        .get("result")
        .and_then(|r| r.as_str())
        .map(WriteResult::parse)
        .ok_or_else(|| TransportError::malformed(engine, "missing result"))
}

fn map_get_reply(engine: &str, id: &str, reply: EngineReply) -> EngineResult<Outcome> {
    if reply.is_not_found() {
        return Ok(Outcome::NotFound);
    }
    if !reply.is_success() {
        return Err(unexpected_status(engine, &reply));
    }
    if !reply.body.get("found").and_then(|f| f.as_bool()).unwrap_or(false) {
        return Ok(Outcome::NotFound);
    }

    let fields = decode_source(engine, reply.body.get("_source"))?;
    let id = reply
        .body
        .get("_id")
        .and_then(|v| v.as_str())
        .unwrap_or(id);
    Ok(Outcome::Found(Document::new(id, fields)))
}

fn map_index_reply(engine: &str, reply: EngineReply) -> EngineResult<Outcome> {
    if !reply.is_success() {
        return Err(unexpected_status(engine, &reply));
    }
    reply
        .body
        .get("_id")
        .and_then(|v| v.as_str())
        .map(|id| Outcome::Created(id.to_string()))
        .ok_or_else(|| TransportError::malformed(engine, "index reply has no _id"))
}

fn map_update_reply(engine: &str, reply: EngineReply) -> EngineResult<Outcome> {
    if reply.is_not_found() {
        return Ok(Outcome::NotFound);
    }
    if !reply.is_success() {
        return Err(unexpected_status(engine, &reply));
    }
    result_of(engine, &reply).map(Outcome::Updated)
}

fn map_delete_reply(engine: &str, reply: EngineReply) -> EngineResult<Outcome> {
    if reply.is_not_found() {
        let result = result_of(engine, &reply).unwrap_or(WriteResult::NotFound);
        return Ok(Outcome::Deleted(result));
    }
    if !reply.is_success() {
        return Err(unexpected_status(engine, &reply));
    }
    result_of(engine, &reply).map(Outcome::Deleted)
}

fn map_search_reply(engine: &str, reply: EngineReply) -> EngineResult<Outcome> {
    // A collection that was never written to has no index yet.
    if reply.is_not_found() && reply.error_type() == Some("index_not_found_exception") {
        return Ok(Outcome::SearchResults(Vec::new()));
    }
    if !reply.is_success() {
        return Err(unexpected_status(engine, &reply));
    }

    let hits = reply
        .body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(|h| h.as_array())
        .ok_or_else(|| TransportError::malformed(engine, "search reply has no hits"))?;

    hits.iter()
        .map(|hit| {
            let id = hit
                .get("_id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| TransportError::malformed(engine, "hit has no _id"))?;
            let fields = decode_source(engine, hit.get("_source"))?;
            Ok(Document::new(id, fields))
        })
        .collect::<EngineResult<Vec<_>>>()
        .map(Outcome::SearchResults)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    use crate::core::ClusterStatus;
    use crate::patch::NovelChanges;
    use crate::query::NovelQuery;

    /// Replays canned replies and counts calls.
    #[derive(Default)]
    struct ScriptedEngine {
        replies: Mutex<VecDeque<EngineResult<EngineReply>>>,
        calls: AtomicUsize,
        stall: bool,
    }

    impl ScriptedEngine {
        fn replying(replies: Vec<EngineResult<EngineReply>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                ..Default::default()
            })
        }

        fn stalled() -> Arc<Self> {
            Arc::new(Self {
                stall: true,
                ..Default::default()
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn next(&self) -> EngineResult<EngineReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.stall {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(EngineReply::new(500, json!({ "error": "script exhausted" }))))
        }
    }

    #[async_trait]
    impl SearchEngine for ScriptedEngine {
        fn engine_name(&self) -> &'static str {
            "scripted"
        }

        async fn health_check(&self) -> EngineResult<ClusterHealth> {
            Ok(ClusterHealth {
                cluster_name: "scripted".to_string(),
                status: ClusterStatus::Green,
            })
        }

        async fn initialize(&self, _collection: &CollectionKey) -> EngineResult<()> {
            Ok(())
        }

        async fn get(&self, _c: &CollectionKey, _id: &str) -> EngineResult<EngineReply> {
            self.next().await
        }

        async fn index(&self, _c: &CollectionKey, _source: Value) -> EngineResult<EngineReply> {
            self.next().await
        }

        async fn update(
            &self,
            _c: &CollectionKey,
            _id: &str,
            _partial: Value,
        ) -> EngineResult<EngineReply> {
            self.next().await
        }

        async fn delete(&self, _c: &CollectionKey, _id: &str) -> EngineResult<EngineReply> {
            self.next().await
        }

        async fn search(
            &self,
            _c: &CollectionKey,
            _plan: &QueryPlan,
            _page: PageRequest,
        ) -> EngineResult<EngineReply> {
            self.next().await
        }
    }

    fn dune() -> Value {
        json!({
            "title": "Dune",
            "author": "Herbert",
            "word_count": "412",
            "public_date": "1965-08-01 00:00:00"
        })
    }

    fn author_patch() -> UpdatePatch {
        UpdatePatch::compose(NovelChanges {
            author: Some("Frank Herbert".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_empty_id_skips_engine() {
        let engine = ScriptedEngine::replying(vec![]);
        let gateway = DocumentGateway::new(engine.clone());

        let outcome = gateway.get(&CollectionKey::novels(), "").await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(engine.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_found_and_missing() {
        let engine = ScriptedEngine::replying(vec![
            Ok(EngineReply::new(
                200,
                json!({ "_id": "abc", "found": true, "_source": dune() }),
            )),
            Ok(EngineReply::new(404, json!({ "_id": "zzz", "found": false }))),
            Ok(EngineReply::new(200, json!({ "_id": "zzz", "found": false }))),
        ]);
        let gateway = DocumentGateway::new(engine);
        let novels = CollectionKey::novels();

        match gateway.get(&novels, "abc").await.unwrap() {
            Outcome::Found(doc) => {
                assert_eq!(doc.id, "abc");
                assert_eq!(doc.fields.title, "Dune");
                assert_eq!(doc.fields.public_date, "1965-08-01 00:00:00");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(gateway.get(&novels, "zzz").await.unwrap().is_not_found());
        assert!(gateway.get(&novels, "zzz").await.unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_get_undecodable_source_is_transport_fault() {
        let engine = ScriptedEngine::replying(vec![Ok(EngineReply::new(
            200,
            json!({ "_id": "abc", "found": true, "_source": { "title": ["not", "a", "string"] } }),
        ))]);
        let gateway = DocumentGateway::new(engine);

        let err = gateway.get(&CollectionKey::novels(), "abc").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Transport {
                operation: Operation::Get,
                source: TransportError::MalformedResponse { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_create_returns_engine_id() {
        let engine = ScriptedEngine::replying(vec![Ok(EngineReply::new(
            201,
            json!({ "_id": "generated-1", "result": "created" }),
        ))]);
        let gateway = DocumentGateway::new(engine);
        let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");

        let outcome = gateway.create(&CollectionKey::novels(), &fields).await.unwrap();
        assert_eq!(outcome, Outcome::Created("generated-1".to_string()));
    }

    #[tokio::test]
    async fn test_create_connection_failure() {
        let engine = ScriptedEngine::replying(vec![Err(TransportError::ConnectionFailed {
            engine: "scripted".to_string(),
            message: "connection refused".to_string(),
        })]);
        let gateway = DocumentGateway::new(engine);
        let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");

        let err = gateway.create(&CollectionKey::novels(), &fields).await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::Create));
        assert!(!err.outcome_unknown());
    }

    #[tokio::test]
    async fn test_create_transport_timeout_is_ambiguous() {
        let engine = ScriptedEngine::replying(vec![Err(TransportError::Timeout {
            engine: "scripted".to_string(),
            message: "operation timed out".to_string(),
        })]);
        let gateway = DocumentGateway::new(engine);
        let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");

        let err = gateway.create(&CollectionKey::novels(), &fields).await.unwrap_err();
        assert!(err.outcome_unknown());
    }

    #[tokio::test]
    async fn test_create_lost_response_is_ambiguous() {
        let engine = ScriptedEngine::replying(vec![Err(TransportError::ResponseLost {
            engine: "scripted".to_string(),
            message: "error decoding response body".to_string(),
        })]);
        let gateway = DocumentGateway::new(engine);
        let fields = NovelFields::new("Dune", "Herbert", "412", "1965-08-01 00:00:00");

        let err = gateway.create(&CollectionKey::novels(), &fields).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Transport {
                operation: Operation::Create,
                source: TransportError::ResponseLost { .. }
            }
        ));
        assert!(err.outcome_unknown());
    }

    #[tokio::test]
    async fn test_update_outcomes() {
        let engine = ScriptedEngine::replying(vec![
            Ok(EngineReply::new(200, json!({ "_id": "abc", "result": "updated" }))),
            Ok(EngineReply::new(200, json!({ "_id": "abc", "result": "noop" }))),
            Ok(EngineReply::new(
                404,
                json!({ "error": { "type": "document_missing_exception", "reason": "[abc]: document missing" } }),
            )),
        ]);
        let gateway = DocumentGateway::new(engine);
        let novels = CollectionKey::novels();
        let patch = author_patch();

        assert_eq!(
            gateway.update(&novels, "abc", &patch).await.unwrap(),
            Outcome::Updated(WriteResult::Updated)
        );
        assert_eq!(
            gateway.update(&novels, "abc", &patch).await.unwrap(),
            Outcome::Updated(WriteResult::Noop)
        );
        assert_eq!(
            gateway.update(&novels, "abc", &patch).await.unwrap(),
            Outcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_update_empty_id_skips_engine() {
        let engine = ScriptedEngine::replying(vec![]);
        let gateway = DocumentGateway::new(engine.clone());

        let outcome = gateway
            .update(&CollectionKey::novels(), "", &author_patch())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(engine.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let engine = ScriptedEngine::replying(vec![
            Ok(EngineReply::new(200, json!({ "_id": "abc", "result": "deleted" }))),
            Ok(EngineReply::new(404, json!({ "_id": "abc", "result": "not_found" }))),
            Ok(EngineReply::new(404, Value::Null)),
        ]);
        let gateway = DocumentGateway::new(engine);
        let novels = CollectionKey::novels();

        assert_eq!(
            gateway.delete(&novels, "abc").await.unwrap(),
            Outcome::Deleted(WriteResult::Deleted)
        );
        assert_eq!(
            gateway.delete(&novels, "abc").await.unwrap(),
            Outcome::Deleted(WriteResult::NotFound)
        );
        assert_eq!(
            gateway.delete(&novels, "abc").await.unwrap(),
            Outcome::Deleted(WriteResult::NotFound)
        );
    }

    #[tokio::test]
    async fn test_search_preserves_engine_order() {
        let engine = ScriptedEngine::replying(vec![Ok(EngineReply::new(
            200,
            json!({
                "hits": {
                    "total": { "value": 2, "relation": "eq" },
                    "hits": [
                        { "_id": "b", "_score": 2.1, "_source": { "title": "Dune Messiah", "author": "Herbert", "word_count": "256", "public_date": "1969-10-15 00:00:00" } },
                        { "_id": "a", "_score": 1.3, "_source": dune() }
                    ]
                }
            }),
        ))]);
        let gateway = DocumentGateway::new(engine);
        let plan = NovelQuery::new().with_author("Herbert").build();

        match gateway
            .search(&CollectionKey::novels(), &plan, PageRequest::default())
            .await
            .unwrap()
        {
            Outcome::SearchResults(docs) => {
                let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
                assert_eq!(ids, ["b", "a"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_missing_index_is_empty() {
        let engine = ScriptedEngine::replying(vec![Ok(EngineReply::new(
            404,
            json!({ "error": { "type": "index_not_found_exception", "reason": "no such index [book]" }, "status": 404 }),
        ))]);
        let gateway = DocumentGateway::new(engine);

        let outcome = gateway
            .search(&CollectionKey::novels(), &QueryPlan::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::SearchResults(vec![]));
    }

    #[tokio::test]
    async fn test_engine_fault_carries_reason() {
        let engine = ScriptedEngine::replying(vec![Ok(EngineReply::new(
            503,
            json!({ "error": { "type": "search_phase_execution_exception", "reason": "all shards failed" } }),
        ))]);
        let gateway = DocumentGateway::new(engine);

        let err = gateway
            .search(&CollectionKey::novels(), &QueryPlan::default(), PageRequest::default())
            .await
            .unwrap_err();
        match err {
            StorageError::Transport {
                operation: Operation::Search,
                source: TransportError::EngineFault { status, reason, .. },
            } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "all shards failed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_write() {
        let engine = ScriptedEngine::stalled();
        let gateway = DocumentGateway::new(engine.clone())
            .with_operation_timeout(Duration::from_millis(250));

        let err = gateway
            .delete(&CollectionKey::novels(), "abc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Interrupted {
                operation: Operation::Delete,
                timeout_ms: 250
            }
        ));
        assert!(err.outcome_unknown());
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_read() {
        let gateway = DocumentGateway::new(ScriptedEngine::stalled())
            .with_operation_timeout(Duration::from_millis(100));

        let err = gateway.get(&CollectionKey::novels(), "abc").await.unwrap_err();
        assert!(matches!(err, StorageError::Interrupted { .. }));
        assert!(!err.outcome_unknown());
    }
}
