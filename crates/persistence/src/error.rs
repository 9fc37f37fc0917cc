//! Error types for the persistence layer.
//!
//! Faults are split in two levels. [`TransportError`] describes what went wrong
//! between this process and the search engine; it is what a
//! [`SearchEngine`](crate::core::SearchEngine) implementation returns.
//! [`StorageError`] is what the document gateway returns to its callers: it adds
//! the operation being performed and the faults that originate in the gateway
//! itself (empty patches, payload serialization, caller-side timeouts).
//!
//! A document that does not exist is never an error. It is reported as
//! [`Outcome::NotFound`](crate::types::Outcome::NotFound).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The gateway operation during which a fault occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
    Search,
    Health,
}

impl Operation {
    /// Returns the operation name as used in log fields and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Search => "search",
            Operation::Health => "health",
        }
    }

    /// Returns `true` if the operation mutates stored documents.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::Delete
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary error type for gateway operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// An update was requested without any field to change.
    #[error("update patch contains no fields")]
    EmptyPatch,

    /// The request payload could not be built.
    #[error("failed to serialize {operation} payload: {source}")]
    Serialization {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// The engine could not be reached, failed, or answered with something unusable.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The caller-side deadline elapsed before the engine answered.
    #[error("{operation} interrupted after {timeout_ms}ms waiting for the engine")]
    Interrupted {
        operation: Operation,
        timeout_ms: u64,
    },
}

impl StorageError {
    /// Returns the operation this error belongs to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StorageError::EmptyPatch => Some(Operation::Update),
            StorageError::Serialization { operation, .. }
            | StorageError::Transport { operation, .. }
            | StorageError::Interrupted { operation, .. } => Some(*operation),
        }
    }

    /// Returns `true` when a write may or may not have been applied.
    ///
    /// A write that timed out (either inside the transport or at the caller-side
    /// deadline), or whose reply was lost after the request went out, was possibly
    /// received and executed by the engine. Callers must not treat such a failure
    /// as "nothing happened".
    pub fn outcome_unknown(&self) -> bool {
        match self {
            StorageError::Interrupted { operation, .. } => operation.is_write(),
            StorageError::Transport { operation, source } => {
                operation.is_write() && source.is_ambiguous()
            }
            StorageError::EmptyPatch | StorageError::Serialization { .. } => false,
        }
    }
}

/// Faults raised while talking to the search engine.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The engine could not be reached.
    #[error("connection to {engine} failed: {message}")]
    ConnectionFailed { engine: String, message: String },

    /// The transport gave up waiting for the engine.
    #[error("request to {engine} timed out: {message}")]
    Timeout { engine: String, message: String },

    /// The request went out but its reply could not be read.
    #[error("response from {engine} was lost: {message}")]
    ResponseLost { engine: String, message: String },

    /// The engine answered with a status the gateway does not accept.
    #[error("{engine} returned status {status}: {reason}")]
    EngineFault {
        engine: String,
        status: u16,
        reason: String,
    },

    /// The engine answered, but the body could not be interpreted.
    #[error("malformed response from {engine}: {message}")]
    MalformedResponse { engine: String, message: String },

    /// The engine belongs to a different cluster than the configured one.
    #[error("{engine} cluster name mismatch: expected '{expected}', found '{actual}'")]
    ClusterMismatch {
        engine: String,
        expected: String,
        actual: String,
    },
}

impl TransportError {
    /// Returns `true` if the fault is a transport-level timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

    /// Returns `true` if the engine may have acted on the request.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout { .. } | TransportError::ResponseLost { .. }
        )
    }

    /// Builds a [`TransportError::MalformedResponse`].
    pub fn malformed(engine: &str, message: impl Into<String>) -> Self {
        TransportError::MalformedResponse {
            engine: engine.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for gateway operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for engine calls.
pub type EngineResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn timeout() -> TransportError {
        TransportError::Timeout {
            engine: "elasticsearch".to_string(),
            message: "deadline has elapsed".to_string(),
        }
    }

    #[test]
    fn test_operation_is_write() {
        assert!(Operation::Create.is_write());
        assert!(Operation::Update.is_write());
        assert!(Operation::Delete.is_write());
        assert!(!Operation::Get.is_write());
        assert!(!Operation::Search.is_write());
        assert!(!Operation::Health.is_write());
    }

    #[test]
    fn test_write_timeout_is_ambiguous() {
        let err = StorageError::Transport {
            operation: Operation::Create,
            source: timeout(),
        };
        assert!(err.outcome_unknown());

        let err = StorageError::Interrupted {
            operation: Operation::Delete,
            timeout_ms: 50,
        };
        assert!(err.outcome_unknown());
    }

    #[test]
    fn test_read_timeout_is_not_ambiguous() {
        let err = StorageError::Transport {
            operation: Operation::Search,
            source: timeout(),
        };
        assert!(!err.outcome_unknown());

        let err = StorageError::Interrupted {
            operation: Operation::Get,
            timeout_ms: 50,
        };
        assert!(!err.outcome_unknown());
    }

    #[test]
    fn test_connection_failure_on_write_is_not_ambiguous() {
        let err = StorageError::Transport {
            operation: Operation::Update,
            source: TransportError::ConnectionFailed {
                engine: "elasticsearch".to_string(),
                message: "connection refused".to_string(),
            },
        };
        assert!(!err.outcome_unknown());
    }

    #[test]
    fn test_lost_write_response_is_ambiguous() {
        let lost = || TransportError::ResponseLost {
            engine: "elasticsearch".to_string(),
            message: "connection reset by peer".to_string(),
        };
        let err = StorageError::Transport {
            operation: Operation::Update,
            source: lost(),
        };
        assert!(err.outcome_unknown());

        let err = StorageError::Transport {
            operation: Operation::Get,
            source: lost(),
        };
        assert!(!err.outcome_unknown());
    }

    #[test]
    fn test_display() {
        let err = StorageError::Transport {
            operation: Operation::Get,
            source: TransportError::EngineFault {
                engine: "elasticsearch".to_string(),
                status: 503,
                reason: "all shards failed".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "get failed: elasticsearch returned status 503: all shards failed"
        );
        assert_eq!(
            StorageError::EmptyPatch.to_string(),
            "update patch contains no fields"
        );
    }
}
