//! Catalog statistics.
//!
//! `total_properties` is exact (dedicated count operation). The facet lists
//! are computed from a bounded sample of the catalog, deliberately not a
//! full-catalog distinct scan: treat them as estimates, never as complete
//! value sets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::SearchTuning;
use crate::error::Result;
use crate::store::{DocumentStore, StoreQuery};

/// Sample-based catalog statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Exact document count
    pub total_properties: u64,

    /// Distinct property types seen in the sample, capped
    pub property_types: Vec<String>,

    /// Distinct cities seen in the sample, capped
    pub cities: Vec<String>,

    /// Distinct listing platforms seen in the sample, capped
    pub platforms: Vec<String>,
}

/// A single facet value with its aggregated document count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

pub struct StatsService {
    store: Arc<dyn DocumentStore>,
    index: String,
    sample_size: usize,
    facet_limit: usize,
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>, index: String, tuning: &SearchTuning) -> Self {
        Self {
            store,
            index,
            sample_size: tuning.stats_sample_size,
            facet_limit: tuning.facet_limit,
        }
    }

    /// Compute catalog statistics: an exact total plus facet values
    /// extracted from the first `sample_size` documents in store order.
    pub async fn stats(&self) -> Result<CatalogStats> {
        let total_properties = self.store.count(&self.index).await?;

        let sample = self
            .store
            .search(
                &self.index,
                &StoreQuery::new(json!({"match_all": {}}), self.sample_size),
            )
            .await?;

        let mut property_types: Vec<String> = Vec::new();
        let mut cities: Vec<String> = Vec::new();
        let mut platforms: Vec<String> = Vec::new();

        for hit in &sample.hits {
            collect_distinct(
                &mut property_types,
                hit.source.get("property_type"),
                self.facet_limit,
            );
            collect_distinct(
                &mut cities,
                hit.source.pointer("/address/city"),
                self.facet_limit,
            );
            collect_distinct(
                &mut platforms,
                hit.source.get("platform_name"),
                self.facet_limit,
            );
        }

        Ok(CatalogStats {
            total_properties,
            property_types,
            cities,
            platforms,
        })
    }

    /// Aggregated value counts for a single keyword field, computed by the
    /// store itself rather than the sample.
    pub async fn facet_counts(&self, field: &str) -> Result<Vec<FacetCount>> {
        let aggregation_name = format!("{field}_counts");
        let request = StoreQuery::new(json!({"match_all": {}}), 0).with_aggregations(json!({
            (aggregation_name.as_str()): {
                "terms": {
                    "field": field,
                    "size": 50
                }
            }
        }));

        let outcome = self.store.search(&self.index, &request).await?;
        let buckets = outcome
            .aggregations
            .as_ref()
            .and_then(|aggs| aggs.pointer(&format!("/{aggregation_name}/buckets")))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(buckets
            .iter()
            .filter_map(|bucket| {
                Some(FacetCount {
                    value: bucket.get("key")?.as_str()?.to_string(),
                    count: bucket.get("doc_count")?.as_u64()?,
                })
            })
            .collect())
    }
}

/// Push a distinct string value in first-seen order, up to `limit` entries
fn collect_distinct(values: &mut Vec<String>, candidate: Option<&Value>, limit: usize) {
    if values.len() >= limit {
        return;
    }
    if let Some(text) = candidate.and_then(Value::as_str) {
        if !text.is_empty() && !values.iter().any(|v| v == text) {
            values.push(text.to_string());
        }
    }
}
