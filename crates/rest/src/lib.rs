//! # bookshelf-rest - HTTP API for the Bookshelf novel store
//!
//! This crate exposes the document gateway of `bookshelf-persistence` over
//! HTTP. Parameters are accepted from the query string and from
//! `application/x-www-form-urlencoded` bodies (body values win).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookshelf_persistence::backends::memory::MemoryEngine;
//! use bookshelf_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig {
//!         storage_backend: "memory".to_string(),
//!         ..Default::default()
//!     };
//!     let app = create_app_with_config(MemoryEngine::new(), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL | Parameters |
//! |------------|-------------|-----|------------|
//! | read | GET | `/get/book/novel` | `id` (default empty) |
//! | create | POST | `/add/book/novel` | `title`, `author`, `word_count`, `public_date` |
//! | update | PUT | `/update/book/novel` | `id`; any of the four fields |
//! | delete | DELETE | `/delete/book/novel` | `id` |
//! | search | POST | `/query/book/novel` | `title`, `author`, `gt_word_count`, `lt_word_count` |
//! | landing | GET | `/` | |
//! | health | GET | `/health` | |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": {"status", "code", "message", "outcome_unknown"}}`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid | Missing or malformed parameter |
//! | 400 | empty-patch | Update without any field |
//! | 404 | not-found | Document does not exist |
//! | 500 | serialization / transport / interrupted | Engine or payload fault |
//! | 503 | unavailable | Health check failed |
//!
//! `outcome_unknown` is `true` when a write timed out or lost its reply and may
//! still have been applied.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the JSON error body
//! - [`config`] - Server configuration
//! - [`state`] - Application state (gateway, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Parameter extraction and binding
//! - [`responses`] - Outcome rendering
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use bookshelf_persistence::core::SearchEngine;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<E>(engine: E) -> Router
where
    E: SearchEngine + 'static,
{
    create_app_with_config(engine, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `engine` - The search engine to use
/// * `config` - Server configuration
pub fn create_app_with_config<E>(engine: E, config: ServerConfig) -> Router
where
    E: SearchEngine + 'static,
{
    create_app_with_shared_engine(Arc::new(engine), config)
}

/// Creates the Axum application over an engine that is already shared.
///
/// Accepts trait objects, so the engine can be chosen at runtime.
pub fn create_app_with_shared_engine<E>(engine: Arc<E>, config: ServerConfig) -> Router
where
    E: SearchEngine + ?Sized + 'static,
{
    info!(
        engine = engine.engine_name(),
        index = %config.collection_index,
        doc_type = %config.collection_type,
        "Creating REST API server"
    );

    let state = AppState::new(engine, config.clone());

    let router = routing::novel_routes::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bookshelf={level},bookshelf_rest={level},bookshelf_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
