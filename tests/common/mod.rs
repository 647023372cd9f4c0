//! Shared test utilities: an in-memory document store fake that records
//! requests and mimics the small slice of store behavior the services rely
//! on (rank-order hits, script_score filtering, session-term lookups).

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use rental_search::config::{Config, SearchTuning, StoreConfig};
use rental_search::store::{
    BulkFailure, BulkReport, DocumentStore, StoreError, StoreHit, StoreHits, StoreQuery,
    StoreResult,
};

/// In-memory stand-in for the external document store
#[derive(Default)]
pub struct FakeStore {
    /// Documents in store order, as (id, source) pairs
    pub docs: Mutex<Vec<(String, Value)>>,

    /// Overrides the exact count operation; defaults to the document count
    pub count_override: Mutex<Option<u64>>,

    /// Ids whose bulk writes should be reported as failed
    pub bulk_failures: Mutex<HashSet<String>>,

    /// Aggregation payload returned when a search requests aggregations
    pub aggregation_payload: Mutex<Option<Value>>,

    /// When set, every operation fails with an unreachable error
    pub unreachable: Mutex<bool>,

    /// Every search request received, in call order
    pub recorded_searches: Mutex<Vec<StoreQuery>>,
}

impl FakeStore {
    pub fn with_docs(docs: Vec<(String, Value)>) -> Self {
        Self {
            docs: Mutex::new(docs),
            ..Default::default()
        }
    }

    pub fn set_unreachable(&self) {
        *self.unreachable.lock().unwrap() = true;
    }

    fn check_reachable(&self) -> StoreResult<()> {
        if *self.unreachable.lock().unwrap() {
            Err(StoreError::Unreachable("connection refused".into()))
        } else {
            Ok(())
        }
    }

    /// Apply the slice of query semantics the services depend on
    fn matching_docs(&self, query: &Value) -> Vec<(String, Value)> {
        let docs = self.docs.lock().unwrap().clone();

        // Vector-similarity query from the recommendation engine: honor the
        // source exclusion and the availability filter.
        if let Some(script_query) = query.pointer("/script_score/query") {
            let excluded = script_query
                .pointer("/bool/must_not/term/property_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let required_status = script_query
                .pointer("/bool/filter/0/term/property_status")
                .and_then(Value::as_str)
                .unwrap_or("available")
                .to_string();
            return docs
                .into_iter()
                .filter(|(id, source)| {
                    *id != excluded
                        && source.get("property_status").and_then(Value::as_str)
                            == Some(required_status.as_str())
                })
                .collect();
        }

        // Session lookup from the conversation log
        if let Some(session_id) = query.pointer("/term/session_id").and_then(Value::as_str) {
            return docs
                .into_iter()
                .filter(|(_, source)| {
                    source.get("session_id").and_then(Value::as_str) == Some(session_id)
                })
                .collect();
        }

        // Ranked text queries and match_all: every document "matches"
        docs
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn exists(&self, _index: &str) -> StoreResult<bool> {
        self.check_reachable()?;
        Ok(true)
    }

    async fn create_index(&self, _index: &str, _mapping: &Value) -> StoreResult<()> {
        self.check_reachable()
    }

    async fn index_document(
        &self,
        _index: &str,
        id: &str,
        body: &Value,
        _refresh: bool,
    ) -> StoreResult<()> {
        self.check_reachable()?;
        let mut docs = self.docs.lock().unwrap();
        docs.retain(|(existing, _)| existing != id);
        docs.push((id.to_string(), body.clone()));
        Ok(())
    }

    async fn bulk_index(&self, _index: &str, docs: &[(String, Value)]) -> StoreResult<BulkReport> {
        self.check_reachable()?;
        let failures = self.bulk_failures.lock().unwrap();
        let mut report = BulkReport::default();
        for (id, body) in docs {
            if failures.contains(id) {
                report.failed.push(BulkFailure {
                    id: id.clone(),
                    reason: "version_conflict_engine_exception".into(),
                });
                continue;
            }
            let mut stored = self.docs.lock().unwrap();
            stored.retain(|(existing, _)| existing != id);
            stored.push((id.clone(), body.clone()));
            report.success_count += 1;
        }
        Ok(report)
    }

    async fn get(&self, _index: &str, id: &str) -> StoreResult<Option<Value>> {
        self.check_reachable()?;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, source)| source.clone()))
    }

    async fn search(&self, _index: &str, request: &StoreQuery) -> StoreResult<StoreHits> {
        self.check_reachable()?;
        self.recorded_searches.lock().unwrap().push(request.clone());

        let mut matches = self.matching_docs(&request.query);

        // Timestamp sort requested by the conversation log
        if let Some(sort) = &request.sort {
            if sort.pointer("/0/timestamp").is_some() {
                matches.sort_by(|(_, a), (_, b)| {
                    let ta = a.get("timestamp").and_then(Value::as_str).unwrap_or("");
                    let tb = b.get("timestamp").and_then(Value::as_str).unwrap_or("");
                    tb.cmp(ta)
                });
            }
        }

        let total = matches.len() as u64;
        let hits = matches
            .into_iter()
            .take(request.size)
            .map(|(id, source)| StoreHit {
                id,
                score: Some(1.5),
                source,
            })
            .collect();

        Ok(StoreHits {
            hits,
            total,
            aggregations: if request.aggregations.is_some() {
                self.aggregation_payload.lock().unwrap().clone()
            } else {
                None
            },
        })
    }

    async fn count(&self, _index: &str) -> StoreResult<u64> {
        self.check_reachable()?;
        let override_value = *self.count_override.lock().unwrap();
        Ok(override_value.unwrap_or(self.docs.lock().unwrap().len() as u64))
    }
}

/// Configuration used by service-level tests
pub fn test_config() -> Config {
    Config {
        store: StoreConfig {
            url: None,
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 9200,
            username: None,
            password: None,
            api_key: None,
            index_prefix: "test".to_string(),
            request_timeout_secs: 5,
        },
        ai: Default::default(),
        search: SearchTuning::default(),
    }
}

/// A minimal available-property source document
pub fn property_source(id: &str, property_type: &str, city: &str) -> Value {
    json!({
        "property_id": id,
        "name": format!("{property_type} in {city}"),
        "description": "well connected",
        "property_type": property_type,
        "property_status": "available",
        "bedrooms": 2,
        "price": 25000.0,
        "area_sqft": 900.0,
        "amenities": ["parking"],
        "platform_name": "urban-nest",
        "address": {"locality": "Central", "city": city, "state": "KA"}
    })
}
