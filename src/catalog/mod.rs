//! Write-side catalog helpers for the external ingestion pipeline.
//!
//! Documents are validated against the catalog invariants before any write.
//! Bulk writes are at-least-once: failed items are reported per document,
//! successful items stay committed, nothing is rolled back.

use std::sync::Arc;

use tracing::{info, warn};

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::models::PropertyDocument;
use crate::store::{BulkFailure, BulkReport, DocumentStore};

pub struct CatalogWriter {
    store: Arc<dyn DocumentStore>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: String,
}

impl CatalogWriter {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embedder: Option<Arc<dyn EmbeddingProvider>>,
        index: String,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
        }
    }

    /// Index a single property, refreshing the index so the document is
    /// immediately searchable.
    pub async fn index_property(&self, property: &PropertyDocument) -> Result<()> {
        property.validate_invariants()?;

        let prepared = self.prepare(property.clone()).await;
        let body = serde_json::to_value(&prepared)?;
        self.store
            .index_document(&self.index, &prepared.property_id, &body, true)
            .await?;
        info!(property_id = %prepared.property_id, "Indexed property");
        Ok(())
    }

    /// Bulk index properties. Documents failing invariant validation are
    /// reported as failed items alongside store-side item errors; the rest
    /// of the batch proceeds.
    pub async fn bulk_index(&self, properties: &[PropertyDocument]) -> Result<BulkReport> {
        let mut rejected: Vec<BulkFailure> = Vec::new();
        let mut accepted: Vec<(String, serde_json::Value)> = Vec::new();

        for property in properties {
            if let Err(e) = property.validate_invariants() {
                rejected.push(BulkFailure {
                    id: property.property_id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
            let prepared = self.prepare(property.clone()).await;
            accepted.push((prepared.property_id.clone(), serde_json::to_value(&prepared)?));
        }

        let mut report = if accepted.is_empty() {
            BulkReport::default()
        } else {
            self.store.bulk_index(&self.index, &accepted).await?
        };
        report.failed.extend(rejected);

        info!(
            indexed = report.success_count,
            failed = report.failed.len(),
            "Bulk indexed properties"
        );
        Ok(report)
    }

    /// Fill in the combined text and, when an embedding provider is
    /// configured, a missing embedding vector. Embedding failure downgrades
    /// to indexing without a vector; the recommendation path treats that as
    /// a valid state.
    async fn prepare(&self, mut property: PropertyDocument) -> PropertyDocument {
        if property.combined_text.is_none() {
            property.combined_text = Some(property.build_combined_text());
        }

        if property.embedding.is_none() {
            if let Some(embedder) = &self.embedder {
                let text = property
                    .combined_text
                    .clone()
                    .unwrap_or_else(|| property.build_combined_text());
                match embedder.embed(&text).await {
                    Ok(vector) => property.embedding = Some(vector),
                    Err(e) => {
                        warn!(
                            property_id = %property.property_id,
                            error = %e,
                            "Embedding generation failed, indexing without vector"
                        );
                    }
                }
            }
        }

        property
    }
}
