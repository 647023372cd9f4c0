//! Content-based property recommendations.
//!
//! Ranks candidate properties by cosine similarity between their stored
//! embeddings and the source property's vector. A property without an
//! embedding simply has no recommendations; that is a valid state for a
//! partially-indexed catalog, not an error.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::models::{PropertyStatus, PropertyView};
use crate::store::{DocumentStore, StoreQuery};

pub struct RecommendationEngine {
    store: Arc<dyn DocumentStore>,
    index: String,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn DocumentStore>, index: String) -> Self {
        Self { store, index }
    }

    /// Recommend up to `limit` properties similar to the given one.
    /// Unknown id and missing embedding both yield an empty list; store
    /// failures propagate to the caller.
    pub async fn recommend(&self, property_id: &str, limit: usize) -> Result<Vec<PropertyView>> {
        let Some(source) = self.store.get(&self.index, property_id).await? else {
            info!(property_id, "Recommendation source not found");
            return Ok(Vec::new());
        };

        let Some(embedding) = source.get("embedding").filter(|e| e.is_array()) else {
            info!(property_id, "Recommendation source has no embedding");
            return Ok(Vec::new());
        };

        let query = self.similarity_query(property_id, embedding);
        let hits = self
            .store
            .search(&self.index, &StoreQuery::new(query, limit))
            .await?;

        Ok(hits
            .hits
            .iter()
            .map(|hit| PropertyView::from_source(&hit.source))
            .collect())
    }

    /// Similarity-scored query over the rest of the catalog: exclude the
    /// source id, keep only available listings, score by cosine similarity
    /// offset by +1.0 so scores stay non-negative.
    fn similarity_query(&self, property_id: &str, embedding: &Value) -> Value {
        json!({
            "script_score": {
                "query": {
                    "bool": {
                        "must_not": {"term": {"property_id": property_id}},
                        "filter": [
                            {"term": {"property_status": PropertyStatus::Available.to_string()}}
                        ]
                    }
                },
                "script": {
                    "source": "cosineSimilarity(params.query_vector, 'embedding') + 1.0",
                    "params": {"query_vector": embedding}
                }
            }
        })
    }
}
