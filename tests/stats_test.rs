//! Catalog statistics: exact totals, sample-based facets, facet caps.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{property_source, test_config, FakeStore};
use rental_search::stats::StatsService;

fn service(store: Arc<FakeStore>) -> StatsService {
    StatsService::new(store, "test_properties".to_string(), &test_config().search)
}

#[tokio::test]
async fn test_total_comes_from_count_operation_not_sample() {
    let docs = (0..3)
        .map(|i| {
            (
                format!("prop-{i}"),
                property_source(&format!("prop-{i}"), "apartment", "Bengaluru"),
            )
        })
        .collect();
    let store = Arc::new(FakeStore::with_docs(docs));
    // The catalog is far larger than the sampled slice
    *store.count_override.lock().unwrap() = Some(4821);

    let stats = service(store).stats().await.unwrap();
    assert_eq!(stats.total_properties, 4821);
    assert_eq!(stats.property_types, vec!["apartment"]);
}

#[tokio::test]
async fn test_facets_capped_at_twenty_distinct_values() {
    let docs = (0..30)
        .map(|i| {
            (
                format!("prop-{i}"),
                property_source(
                    &format!("prop-{i}"),
                    &format!("type-{i}"),
                    &format!("city-{i}"),
                ),
            )
        })
        .collect();
    let store = Arc::new(FakeStore::with_docs(docs));

    let stats = service(store).stats().await.unwrap();
    assert_eq!(stats.property_types.len(), 20);
    assert_eq!(stats.cities.len(), 20);
    // First-seen order from the sample
    assert_eq!(stats.cities[0], "city-0");
}

#[tokio::test]
async fn test_sample_query_is_bounded() {
    let store = Arc::new(FakeStore::default());
    service(store.clone()).stats().await.unwrap();

    let recorded = store.recorded_searches.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].size, 100);
    assert!(recorded[0].query.get("match_all").is_some());
}

#[tokio::test]
async fn test_facet_counts_parse_aggregation_buckets() {
    let store = Arc::new(FakeStore::default());
    *store.aggregation_payload.lock().unwrap() = Some(json!({
        "property_type_counts": {
            "buckets": [
                {"key": "apartment", "doc_count": 320},
                {"key": "villa", "doc_count": 45}
            ]
        }
    }));

    let counts = service(store.clone())
        .facet_counts("property_type")
        .await
        .unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].value, "apartment");
    assert_eq!(counts[0].count, 320);

    // The aggregation rides the search request; no hits are asked for.
    let recorded = store.recorded_searches.lock().unwrap();
    assert_eq!(recorded[0].size, 0);
    assert!(recorded[0].aggregations.is_some());
}
