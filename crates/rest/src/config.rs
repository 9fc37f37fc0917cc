//! Server configuration for the Bookshelf HTTP API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BOOKSHELF_SERVER_PORT` | 8080 | Server port |
//! | `BOOKSHELF_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `BOOKSHELF_LOG_LEVEL` | info | Log level |
//! | `BOOKSHELF_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `BOOKSHELF_ENABLE_CORS` | true | Enable CORS |
//! | `BOOKSHELF_CORS_ORIGINS` | * | Allowed origins |
//! | `BOOKSHELF_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `BOOKSHELF_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `BOOKSHELF_STORAGE_BACKEND` | elasticsearch | `elasticsearch` or `memory` |
//! | `BOOKSHELF_ES_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `BOOKSHELF_ES_CLUSTER_NAME` | mrliu | Expected `cluster.name` |
//! | `BOOKSHELF_ES_USERNAME` | - | Basic auth user |
//! | `BOOKSHELF_ES_PASSWORD` | - | Basic auth password |
//! | `BOOKSHELF_ES_REQUEST_TIMEOUT_MS` | 20000 | Engine transport timeout |
//! | `BOOKSHELF_ES_REFRESH` | wait_for | `none`, `wait_for` or `immediate` |
//! | `BOOKSHELF_ES_INSECURE` | false | Skip certificate validation |
//! | `BOOKSHELF_INDEX` | book | Collection index |
//! | `BOOKSHELF_DOC_TYPE` | novel | Collection document type |
//! | `BOOKSHELF_OPERATION_TIMEOUT_MS` | 10000 | Gateway deadline per call |
//!
//! # Example
//!
//! ```rust
//! use bookshelf_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     storage_backend: "memory".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use bookshelf_persistence::core::RefreshPolicy;
use bookshelf_persistence::types::CollectionKey;
use clap::Parser;

/// Which search engine the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendMode {
    /// A remote Elasticsearch cluster.
    Elasticsearch,
    /// Process-local storage; data is lost on exit.
    Memory,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Elasticsearch => write!(f, "elasticsearch"),
            StorageBackendMode::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elasticsearch" | "es" => Ok(StorageBackendMode::Elasticsearch),
            "memory" | "mem" => Ok(StorageBackendMode::Memory),
            other => Err(format!(
                "unknown storage backend '{}' (expected 'elasticsearch' or 'memory')",
                other
            )),
        }
    }
}

/// Server configuration for the Bookshelf HTTP API.
///
/// This struct can be constructed from command line arguments and environment
/// variables using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Novel document store served over HTTP")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "BOOKSHELF_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "BOOKSHELF_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "BOOKSHELF_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "BOOKSHELF_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "BOOKSHELF_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "BOOKSHELF_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "BOOKSHELF_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Storage backend (`elasticsearch` or `memory`).
    #[arg(long, env = "BOOKSHELF_STORAGE_BACKEND", default_value = "elasticsearch")]
    pub storage_backend: String,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(long, env = "BOOKSHELF_ES_NODES", default_value = "http://localhost:9200")]
    pub elasticsearch_nodes: String,

    /// Expected Elasticsearch `cluster.name`. Empty disables the check.
    #[arg(long, env = "BOOKSHELF_ES_CLUSTER_NAME", default_value = "mrliu")]
    pub elasticsearch_cluster_name: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "BOOKSHELF_ES_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "BOOKSHELF_ES_PASSWORD")]
    pub elasticsearch_password: Option<String>,

    /// Elasticsearch transport timeout in milliseconds.
    #[arg(long, env = "BOOKSHELF_ES_REQUEST_TIMEOUT_MS", default_value = "20000")]
    pub elasticsearch_request_timeout_ms: u64,

    /// When writes become visible to search (`none`, `wait_for`, `immediate`).
    #[arg(long, env = "BOOKSHELF_ES_REFRESH", default_value = "wait_for")]
    pub elasticsearch_refresh: RefreshPolicy,

    /// Skip TLS certificate validation. Development only.
    #[arg(long, env = "BOOKSHELF_ES_INSECURE", default_value = "false")]
    pub elasticsearch_insecure: bool,

    /// Index holding the novels.
    #[arg(long, env = "BOOKSHELF_INDEX", default_value = "book")]
    pub collection_index: String,

    /// Document type of the novels.
    #[arg(long, env = "BOOKSHELF_DOC_TYPE", default_value = "novel")]
    pub collection_type: String,

    /// Caller-side deadline for a single engine call in milliseconds.
    ///
    /// Must be shorter than the request timeout.
    #[arg(long, env = "BOOKSHELF_OPERATION_TIMEOUT_MS", default_value = "10000")]
    pub operation_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            storage_backend: "elasticsearch".to_string(),
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_cluster_name: "mrliu".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_request_timeout_ms: 20_000,
            elasticsearch_refresh: RefreshPolicy::WaitFor,
            elasticsearch_insecure: false,
            collection_index: "book".to_string(),
            collection_type: "novel".to_string(),
            operation_timeout_ms: 10_000,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the parsed storage backend.
    pub fn storage_backend_mode(&self) -> Result<StorageBackendMode, String> {
        self.storage_backend.parse()
    }

    /// Returns the configured Elasticsearch node URLs.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the collection the HTTP routes operate on.
    pub fn collection(&self) -> CollectionKey {
        CollectionKey::new(&self.collection_index, &self.collection_type)
    }

    /// Returns the gateway deadline, if one is configured.
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_ms > 0).then(|| Duration::from_millis(self.operation_timeout_ms))
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        // Engine deadlines must fire before the HTTP timeout.
        let request_timeout_ms = self.request_timeout.saturating_mul(1000);
        if self.operation_timeout_ms == 0 {
            errors.push("Operation timeout cannot be 0".to_string());
        } else if self.operation_timeout_ms >= request_timeout_ms {
            errors.push(format!(
                "Operation timeout ({}ms) must be shorter than the request timeout ({}s)",
                self.operation_timeout_ms, self.request_timeout
            ));
        }

        let mode = match self.storage_backend_mode() {
            Ok(mode) => Some(mode),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        if mode == Some(StorageBackendMode::Elasticsearch) {
            if self.elasticsearch_node_list().is_empty() {
                errors.push("At least one Elasticsearch node is required".to_string());
            }
            if self.elasticsearch_request_timeout_ms == 0 {
                errors.push("Elasticsearch request timeout cannot be 0".to_string());
            } else if self.elasticsearch_request_timeout_ms >= request_timeout_ms {
                errors.push(format!(
                    "Elasticsearch request timeout ({}ms) must be shorter than the request timeout ({}s)",
                    self.elasticsearch_request_timeout_ms, self.request_timeout
                ));
            }
            if self.elasticsearch_username.is_some() != self.elasticsearch_password.is_some() {
                errors.push(
                    "Elasticsearch username and password must be set together".to_string(),
                );
            }
        }

        if self.collection_index.trim().is_empty() {
            errors.push("Collection index cannot be empty".to_string());
        }

        if self.collection_type.trim().is_empty() {
            errors.push("Collection document type cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, the in-memory engine, and disables features
    /// that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            storage_backend: "memory".to_string(),
            operation_timeout_ms: 2_000,
            ..Default::default()
        }
    }
}
