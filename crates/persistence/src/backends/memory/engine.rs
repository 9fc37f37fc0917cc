//! In-memory search engine.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::core::{ClusterHealth, ClusterStatus, EngineReply, SearchEngine};
use crate::error::{EngineResult, TransportError};
use crate::query::QueryPlan;
use crate::types::{CollectionKey, PageRequest};

use super::matcher::matches_plan;

/// A stored source document.
#[derive(Debug, Clone)]
struct StoredSource {
    id: String,
    source: Value,
}

/// Documents of one index, in insertion order.
#[derive(Debug, Default)]
struct MemoryIndex {
    docs: Vec<StoredSource>,
}

impl MemoryIndex {
    fn position(&self, id: &str) -> Option<usize> {
        self.docs.iter().position(|d| d.id == id)
    }
}

/// A [`SearchEngine`] that keeps documents in process memory.
///
/// Replies mimic the Elasticsearch REST bodies, so the gateway treats this engine
/// exactly like a real cluster. Indices are created on first write. Search
/// returns hits in insertion order. Writes are visible to search immediately.
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct MemoryEngine {
    indices: Arc<RwLock<HashMap<String, MemoryIndex>>>,
    cluster_name: String,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Creates an empty engine reporting the cluster name `memory`.
    pub fn new() -> Self {
        Self::with_cluster_name("memory")
    }

    /// Creates an empty engine reporting `cluster_name` from health checks.
    pub fn with_cluster_name(cluster_name: impl Into<String>) -> Self {
        Self {
            indices: Arc::new(RwLock::new(HashMap::new())),
            cluster_name: cluster_name.into(),
        }
    }

    /// Returns the number of documents stored in `collection`.
    pub fn document_count(&self, collection: &CollectionKey) -> usize {
        self.indices
            .read()
            .get(collection.index())
            .map_or(0, |index| index.docs.len())
    }

    fn index_not_found(collection: &CollectionKey) -> EngineReply {
        EngineReply::new(
            404,
            json!({
                "error": {
                    "type": "index_not_found_exception",
                    "reason": format!("no such index [{}]", collection.index()),
                },
                "status": 404
            }),
        )
    }
}

fn object_source(source: Value) -> EngineResult<Value> {
    match source {
        Value::Object(_) => Ok(source),
        other => Err(TransportError::malformed(
            "memory",
            format!("document source must be an object, got {}", other),
        )),
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    fn engine_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> EngineResult<ClusterHealth> {
        Ok(ClusterHealth {
            cluster_name: self.cluster_name.clone(),
            status: ClusterStatus::Green,
        })
    }

    async fn initialize(&self, collection: &CollectionKey) -> EngineResult<()> {
        self.indices
            .write()
            .entry(collection.index().to_string())
            .or_default();
        Ok(())
    }

    async fn get(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply> {
        let indices = self.indices.read();
        let Some(index) = indices.get(collection.index()) else {
            return Ok(Self::index_not_found(collection));
        };

        let reply = match index.position(id) {
            Some(pos) => EngineReply::new(
                200,
                json!({
                    "_index": collection.index(),
                    "_id": id,
                    "found": true,
                    "_source": index.docs[pos].source,
                }),
            ),
            None => EngineReply::new(
                404,
                json!({ "_index": collection.index(), "_id": id, "found": false }),
            ),
        };
        Ok(reply)
    }

    async fn index(
        &self,
        collection: &CollectionKey,
        source: Value,
    ) -> EngineResult<EngineReply> {
        let source = object_source(source)?;
        let id = Uuid::new_v4().simple().to_string();

        self.indices
            .write()
            .entry(collection.index().to_string())
            .or_default()
            .docs
            .push(StoredSource {
                id: id.clone(),
                source,
            });

        Ok(EngineReply::new(
            201,
            json!({ "_index": collection.index(), "_id": id, "result": "created" }),
        ))
    }

    async fn update(
        &self,
        collection: &CollectionKey,
        id: &str,
        partial: Value,
    ) -> EngineResult<EngineReply> {
        let Value::Object(partial) = object_source(partial)? else {
            return Err(TransportError::malformed("memory", "partial is not an object"));
        };

        let mut indices = self.indices.write();
        let Some(index) = indices.get_mut(collection.index()) else {
            return Ok(Self::index_not_found(collection));
        };
        let Some(pos) = index.position(id) else {
            return Ok(EngineReply::new(
                404,
                json!({
                    "error": {
                        "type": "document_missing_exception",
                        "reason": format!("[{}]: document missing", id),
                    },
                    "status": 404
                }),
            ));
        };

        let Value::Object(stored) = &mut index.docs[pos].source else {
            return Err(TransportError::malformed("memory", "stored source is not an object"));
        };

        let mut changed = false;
        for (key, value) in partial {
            if stored.get(&key) != Some(&value) {
                stored.insert(key, value);
                changed = true;
            }
        }

        let result = if changed { "updated" } else { "noop" };
        Ok(EngineReply::new(
            200,
            json!({ "_index": collection.index(), "_id": id, "result": result }),
        ))
    }

    async fn delete(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply> {
        let mut indices = self.indices.write();
        let removed = indices
            .get_mut(collection.index())
            .and_then(|index| index.position(id).map(|pos| index.docs.remove(pos)))
            .is_some();

        let (status, result) = if removed {
            (200, "deleted")
        } else {
            (404, "not_found")
        };
        Ok(EngineReply::new(
            status,
            json!({ "_index": collection.index(), "_id": id, "result": result }),
        ))
    }

    async fn search(
        &self,
        collection: &CollectionKey,
        plan: &QueryPlan,
        page: PageRequest,
    ) -> EngineResult<EngineReply> {
        let indices = self.indices.read();
        let Some(index) = indices.get(collection.index()) else {
            return Ok(Self::index_not_found(collection));
        };

        let matching: Vec<&StoredSource> = index
            .docs
            .iter()
            .filter(|doc| matches_plan(plan, &doc.source))
            .collect();

        let hits: Vec<Value> = matching
            .iter()
            .skip(usize::try_from(page.from).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .map(|doc| {
                json!({
                    "_index": collection.index(),
                    "_id": doc.id,
                    "_score": 1.0,
                    "_source": doc.source,
                })
            })
            .collect();

        Ok(EngineReply::new(
            200,
            json!({
                "hits": {
                    "total": { "value": matching.len(), "relation": "eq" },
                    "hits": hits
                }
            }),
        ))
    }
}
