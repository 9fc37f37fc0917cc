//! Bookshelf server
//!
//! Serves the novel collection over HTTP, backed by Elasticsearch or by
//! process-local memory.

use bookshelf_persistence::core::SearchEngine;
use bookshelf_rest::{ServerConfig, StorageBackendMode, create_app_with_config, init_logging};
use clap::Parser;
use tracing::{info, warn};

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Prepares the collection, logging instead of failing when the engine is down.
///
/// The server still starts so `/health` can report the problem.
async fn prepare_collection<E: SearchEngine>(engine: &E, config: &ServerConfig) {
    let collection = config.collection();
    match engine.initialize(&collection).await {
        Ok(()) => info!(
            engine = engine.engine_name(),
            index = %collection.index(),
            "Collection ready"
        ),
        Err(e) => warn!(
            engine = engine.engine_name(),
            index = %collection.index(),
            error = %e,
            "Could not prepare collection; continuing"
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let backend_mode = config
        .storage_backend_mode()
        .map_err(|e| anyhow::anyhow!("Invalid storage backend configuration: {}", e))?;

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %backend_mode,
        index = %config.collection_index,
        doc_type = %config.collection_type,
        "Starting Bookshelf server"
    );

    match backend_mode {
        StorageBackendMode::Elasticsearch => {
            start_elasticsearch(config).await?;
        }
        StorageBackendMode::Memory => {
            start_memory(config).await?;
        }
    }

    Ok(())
}

/// Starts the server with the in-memory engine.
async fn start_memory(config: ServerConfig) -> anyhow::Result<()> {
    use bookshelf_persistence::backends::memory::MemoryEngine;

    let engine = MemoryEngine::with_cluster_name(config.elasticsearch_cluster_name.clone());
    info!("In-memory engine initialized; documents are lost on exit");
    prepare_collection(&engine, &config).await;

    let app = create_app_with_config(engine, config.clone());
    serve(app, &config).await
}

/// Starts the server with the Elasticsearch engine.
#[cfg(feature = "elasticsearch")]
async fn start_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use bookshelf_persistence::backends::elasticsearch::{
        ElasticsearchAuth, ElasticsearchConfig, ElasticsearchEngine,
    };

    let es_nodes = config.elasticsearch_node_list();

    let es_auth = match (
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: es_nodes.clone(),
        cluster_name: config.elasticsearch_cluster_name.clone(),
        request_timeout_ms: config.elasticsearch_request_timeout_ms,
        refresh: config.elasticsearch_refresh,
        auth: es_auth,
        disable_certificate_validation: config.elasticsearch_insecure,
        ..Default::default()
    };

    info!(
        nodes = ?es_nodes,
        cluster_name = %es_config.cluster_name,
        refresh = %es_config.refresh,
        "Initializing Elasticsearch engine"
    );

    let engine = ElasticsearchEngine::new(es_config)?;
    prepare_collection(&engine, &config).await;

    let app = create_app_with_config(engine, config.clone());
    serve(app, &config).await
}

/// Fallback when elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The elasticsearch backend requires the 'elasticsearch' feature. \
         Build with: cargo build -p bookshelf-server --features elasticsearch"
    )
}
