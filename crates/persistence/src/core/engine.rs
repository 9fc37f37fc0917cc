//! The search engine capability.
//!
//! [`SearchEngine`] is the seam between the document gateway and a concrete
//! engine client. Implementations speak the engine's protocol and hand back the
//! raw reply; the gateway owns the mapping of replies onto
//! [`Outcome`](crate::types::Outcome)s. Replies use the Elasticsearch REST body
//! shapes (`found`, `_source`, `_id`, `result`, `hits.hits`, `error.reason`),
//! which every engine is expected to produce.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineResult;
use crate::query::QueryPlan;
use crate::types::{CollectionKey, PageRequest};

/// A raw engine reply: HTTP-style status plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReply {
    /// Status code.
    pub status: u16,
    /// Reply body. `Value::Null` when the engine sent none.
    pub body: Value,
}

impl EngineReply {
    /// Creates a reply.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` for 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `error.type` from the body, if any.
    pub fn error_type(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(|e| e.get("type"))
            .and_then(|t| t.as_str())
    }

    /// Returns a human-readable failure reason from the body.
    pub fn error_reason(&self) -> String {
        match self.body.get("error") {
            Some(Value::String(s)) => s.clone(),
            Some(err) => err
                .get("reason")
                .and_then(|r| r.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
            None => format!("unexpected status {}", self.status),
        }
    }
}

/// Cluster status colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    /// All shards allocated.
    Green,
    /// Primaries allocated, some replicas missing.
    Yellow,
    /// Some primaries missing.
    Red,
    /// The engine reported something else.
    #[serde(other)]
    Unknown,
}

impl ClusterStatus {
    /// Parses a status string as reported by the engine.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "green" => ClusterStatus::Green,
            "yellow" => ClusterStatus::Yellow,
            "red" => ClusterStatus::Red,
            _ => ClusterStatus::Unknown,
        }
    }

    /// Returns `true` if documents can be served.
    pub fn is_available(&self) -> bool {
        matches!(self, ClusterStatus::Green | ClusterStatus::Yellow)
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClusterStatus::Green => "green",
            ClusterStatus::Yellow => "yellow",
            ClusterStatus::Red => "red",
            ClusterStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Cluster identity and health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterHealth {
    /// Name of the cluster the engine belongs to.
    pub cluster_name: String,
    /// Status colour.
    pub status: ClusterStatus,
}

/// When writes become visible to search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Leave visibility to the engine's refresh interval.
    None,
    /// Return once the write is visible to search.
    #[default]
    WaitFor,
    /// Force a refresh after every write.
    Immediate,
}

impl RefreshPolicy {
    /// Returns the policy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshPolicy::None => "none",
            RefreshPolicy::WaitFor => "wait_for",
            RefreshPolicy::Immediate => "immediate",
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" => Ok(RefreshPolicy::None),
            "wait_for" | "wait-for" => Ok(RefreshPolicy::WaitFor),
            "immediate" | "true" => Ok(RefreshPolicy::Immediate),
            other => Err(format!(
                "invalid refresh policy '{}': expected none, wait_for or immediate",
                other
            )),
        }
    }
}

/// A document search engine.
///
/// Every call is one round trip. Implementations return `Err` only when no
/// usable reply was obtained (connection failure, transport timeout, or an
/// unreadable body); every status the engine answers with, including 404 and
/// 5xx, is returned as an [`EngineReply`].
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Returns a short name for logs and error messages.
    fn engine_name(&self) -> &'static str;

    /// Reports cluster identity and health.
    async fn health_check(&self) -> EngineResult<ClusterHealth>;

    /// Prepares `collection` for use (creates the index and mapping if missing).
    ///
    /// Idempotent.
    async fn initialize(&self, collection: &CollectionKey) -> EngineResult<()>;

    /// Fetches one document by id.
    async fn get(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply>;

    /// Indexes a new document under an engine-assigned id.
    async fn index(&self, collection: &CollectionKey, source: Value)
    -> EngineResult<EngineReply>;

    /// Merges `partial` into an existing document. Must not create documents.
    async fn update(
        &self,
        collection: &CollectionKey,
        id: &str,
        partial: Value,
    ) -> EngineResult<EngineReply>;

    /// Deletes one document by id.
    async fn delete(&self, collection: &CollectionKey, id: &str) -> EngineResult<EngineReply>;

    /// Runs a search and returns one page of hits.
    async fn search(
        &self,
        collection: &CollectionKey,
        plan: &QueryPlan,
        page: PageRequest,
    ) -> EngineResult<EngineReply>;
}
