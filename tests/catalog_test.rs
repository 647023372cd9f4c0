//! Catalog write path: validation, bulk reporting, conversation history.

mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::Value;

use common::FakeStore;
use rental_search::catalog::CatalogWriter;
use rental_search::conversations::ConversationLog;
use rental_search::models::{
    ConversationMessage, MessageRole, PropertyDocument, PropertyStatus,
};

fn property(id: &str) -> PropertyDocument {
    PropertyDocument {
        property_id: id.to_string(),
        name: format!("Listing {id}"),
        description: "two bedroom apartment".to_string(),
        property_type: "apartment".to_string(),
        bedrooms: Some(2),
        bathrooms: None,
        floor: None,
        total_floors: None,
        area_sqft: Some(900.0),
        carpet_area_sqft: None,
        price: Some(25000.0),
        price_per_sqft: None,
        currency: Some("INR".to_string()),
        property_status: PropertyStatus::Available,
        furnishing: None,
        geo_location: None,
        address: None,
        builder_name: None,
        project_name: None,
        platform_name: None,
        platform_focus: None,
        target_audience: vec![],
        special_features: vec![],
        amenities: vec![],
        nearby_amenities: vec![],
        image_urls: vec![],
        ai_summary: None,
        ai_highlights: None,
        ai_recommendations: None,
        embedding: None,
        combined_text: None,
        created_at: None,
        updated_at: None,
    }
}

fn writer(store: Arc<FakeStore>) -> CatalogWriter {
    CatalogWriter::new(store, None, "test_properties".to_string())
}

#[tokio::test]
async fn test_index_property_fills_combined_text() {
    let store = Arc::new(FakeStore::default());
    writer(store.clone()).index_property(&property("prop-1")).await.unwrap();

    let docs = store.docs.lock().unwrap();
    assert_eq!(docs.len(), 1);
    let combined = docs[0].1.get("combined_text").and_then(Value::as_str).unwrap();
    assert!(combined.contains("Listing prop-1"));
}

#[tokio::test]
async fn test_invalid_property_rejected_before_write() {
    let store = Arc::new(FakeStore::default());
    let mut bad = property("prop-1");
    bad.price = Some(-5.0);

    assert!(writer(store.clone()).index_property(&bad).await.is_err());
    assert!(store.docs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bulk_reports_collisions_without_rollback() {
    let store = Arc::new(FakeStore::default());
    // Two of the ten writes collide with already-indexed versions
    store.bulk_failures.lock().unwrap().extend([
        "prop-3".to_string(),
        "prop-7".to_string(),
    ]);

    let batch: Vec<PropertyDocument> = (0..10).map(|i| property(&format!("prop-{i}"))).collect();
    let report = writer(store.clone()).bulk_index(&batch).await.unwrap();

    assert_eq!(report.success_count, 8);
    assert_eq!(report.failed.len(), 2);
    let failed_ids: Vec<&str> = report.failed.iter().map(|f| f.id.as_str()).collect();
    assert!(failed_ids.contains(&"prop-3"));
    assert!(failed_ids.contains(&"prop-7"));
    // Successful items stay committed
    assert_eq!(store.docs.lock().unwrap().len(), 8);
}

#[tokio::test]
async fn test_bulk_reports_invalid_documents_per_item() {
    let store = Arc::new(FakeStore::default());
    let mut batch = vec![property("prop-1"), property("prop-2")];
    batch[1].embedding = Some(vec![0.0; 4]);

    let report = writer(store.clone()).bulk_index(&batch).await.unwrap();
    assert_eq!(report.success_count, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, "prop-2");
    assert!(report.failed[0].reason.contains("embedding"));
}

#[tokio::test]
async fn test_history_returns_chronological_order() {
    let store = Arc::new(FakeStore::default());
    let log = ConversationLog::new(store.clone(), "test_conversations".to_string());

    for (hour, text) in [(9, "hi"), (10, "2 bhk in indiranagar"), (11, "under 30k")] {
        let mut message =
            ConversationMessage::new("session-1", "user-1", MessageRole::User, text);
        message.timestamp = Utc.with_ymd_and_hms(2026, 8, 6, hour, 0, 0).unwrap();
        log.append(&message).await;
    }
    // A different session must not leak in
    let mut other = ConversationMessage::new("session-2", "user-2", MessageRole::User, "villa");
    other.timestamp = Utc.with_ymd_and_hms(2026, 8, 6, 10, 30, 0).unwrap();
    log.append(&other).await;

    let history = log.history("session-1", 10).await.unwrap();
    assert_eq!(history.len(), 3);
    let texts: Vec<&str> = history.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["hi", "2 bhk in indiranagar", "under 30k"]);
}

#[tokio::test]
async fn test_history_limit_keeps_most_recent() {
    let store = Arc::new(FakeStore::default());
    let log = ConversationLog::new(store, "test_conversations".to_string());

    for hour in 8..12 {
        let mut message = ConversationMessage::new(
            "session-1",
            "user-1",
            MessageRole::User,
            format!("message-{hour}"),
        );
        message.timestamp = Utc.with_ymd_and_hms(2026, 8, 6, hour, 0, 0).unwrap();
        log.append(&message).await;
    }

    let history = log.history("session-1", 2).await.unwrap();
    assert_eq!(history.len(), 2);
    // The two newest, oldest first
    assert_eq!(history[0].message, "message-10");
    assert_eq!(history[1].message, "message-11");
}

#[tokio::test]
async fn test_append_failure_does_not_propagate() {
    let store = Arc::new(FakeStore::default());
    store.set_unreachable();
    let log = ConversationLog::new(store, "test_conversations".to_string());

    // Nothing to unwrap: append swallows the failure by contract
    log.append(&ConversationMessage::new(
        "session-1",
        "user-1",
        MessageRole::User,
        "hello",
    ))
    .await;
}
