//! Index mapping for novel collections.
//!
//! `word_count` is mapped as `long` so the range filter compares numbers even
//! though documents carry it as a string; `_source` keeps the string as sent.

use elasticsearch::indices::{IndicesCreateParts, IndicesExistsParts};
use serde_json::{Value, json};

use crate::error::{EngineResult, TransportError};
use crate::types::CollectionKey;

use super::backend::{ElasticsearchConfig, ElasticsearchEngine};
use super::engine::send_error;

/// The `public_date` format in Elasticsearch date-format syntax.
pub const PUBLIC_DATE_ES_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Creates the index body (settings and mappings) for a novel collection.
pub fn create_index_mapping(config: &ElasticsearchConfig) -> Value {
    json!({
        "settings": {
            "number_of_shards": config.number_of_shards,
            "number_of_replicas": config.number_of_replicas
        },
        "mappings": {
            "properties": {
                "title": {
                    "type": "text",
                    "fields": { "keyword": { "type": "keyword", "ignore_above": 256 } }
                },
                "author": {
                    "type": "text",
                    "fields": { "keyword": { "type": "keyword", "ignore_above": 256 } }
                },
                "word_count": { "type": "long" },
                "public_date": {
                    "type": "date",
                    "format": PUBLIC_DATE_ES_FORMAT
                }
            }
        }
    })
}

/// Ensures the collection's index exists, creating it with the novel mapping if necessary.
pub async fn ensure_index(engine: &ElasticsearchEngine, collection: &CollectionKey) -> EngineResult<()> {
    let index = collection.index();

    let exists_response = engine
        .client()
        .indices()
        .exists(IndicesExistsParts::Index(&[index]))
        .send()
        .await
        .map_err(send_error)?;

    if exists_response.status_code().is_success() {
        tracing::debug!("Elasticsearch index '{}' already exists", index);
        return Ok(());
    }

    let mapping = create_index_mapping(engine.config());

    let response = engine
        .client()
        .indices()
        .create(IndicesCreateParts::Index(index))
        .body(mapping)
        .send()
        .await
        .map_err(send_error)?;

    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        // Another process created it first.
        if body.contains("resource_already_exists_exception") {
            return Ok(());
        }
        return Err(TransportError::EngineFault {
            engine: "elasticsearch".to_string(),
            status: status.as_u16(),
            reason: format!("failed to create index {}: {}", index, body),
        });
    }

    tracing::info!(
        "Created Elasticsearch index '{}' for collection {}",
        index,
        collection
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_index_mapping_structure() {
        let config = ElasticsearchConfig {
            number_of_shards: 3,
            number_of_replicas: 0,
            ..Default::default()
        };
        let mapping = create_index_mapping(&config);

        assert_eq!(mapping["settings"]["number_of_shards"], 3);
        assert_eq!(mapping["settings"]["number_of_replicas"], 0);

        let props = &mapping["mappings"]["properties"];
        assert_eq!(props["title"]["type"], "text");
        assert_eq!(props["title"]["fields"]["keyword"]["type"], "keyword");
        assert_eq!(props["author"]["type"], "text");
        assert_eq!(props["word_count"]["type"], "long");
        assert_eq!(props["public_date"]["type"], "date");
        assert_eq!(props["public_date"]["format"], "yyyy-MM-dd HH:mm:ss");
    }
}
