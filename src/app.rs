//! Application wiring.
//!
//! `App` is constructed once at process startup and shared by reference
//! across all request handlers; it replaces any notion of global
//! "initialized" flags. The store connection (including the local-default
//! fallback) and the AI capability decision happen here and nowhere else.

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::CatalogWriter;
use crate::config::Config;
use crate::conversations::ConversationLog;
use crate::embedding::{EmbeddingProvider, VertexEmbedder};
use crate::error::Result;
use crate::models::PropertyView;
use crate::recommend::RecommendationEngine;
use crate::schema;
use crate::search::{QueryCompiler, SearchRequest, SearchResults, SearchService};
use crate::stats::{CatalogStats, StatsService};
use crate::store::{DocumentStore, HttpDocumentStore, RetryPolicy};

/// The service handle owning every long-lived collaborator
pub struct App {
    store: Arc<dyn DocumentStore>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    search: SearchService,
    recommendations: RecommendationEngine,
    stats: StatsService,
    conversations: ConversationLog,
    catalog: CatalogWriter,
}

impl App {
    /// Connect to the document store, decide the AI capability, ensure all
    /// indices exist and wire up the services.
    pub async fn init(config: Config) -> Result<Self> {
        let store: Arc<dyn DocumentStore> =
            Arc::new(HttpDocumentStore::connect(&config.store).await?);

        let embedder: Option<Arc<dyn EmbeddingProvider>> =
            match VertexEmbedder::from_config(&config.ai) {
                Some(embedder) => {
                    info!("AI platform configured, semantic and hybrid ranking enabled");
                    Some(Arc::new(embedder))
                }
                None => {
                    warn!("AI platform not configured, semantic and hybrid requests will degrade to keyword ranking");
                    None
                }
            };
        let ai_available = embedder.is_some();

        let names = config.store.index_names();
        schema::ensure_all(store.as_ref(), &RetryPolicy::default(), &names).await?;
        info!("All indices ensured");

        Ok(Self::assemble(config, store, embedder, ai_available))
    }

    /// Wire services from already-constructed collaborators. Used by
    /// `init` and by tests that substitute a store fake.
    pub fn assemble(
        config: Config,
        store: Arc<dyn DocumentStore>,
        embedder: Option<Arc<dyn EmbeddingProvider>>,
        ai_available: bool,
    ) -> Self {
        let names = config.store.index_names();
        let compiler = QueryCompiler::new(config.search.clone(), ai_available);

        Self {
            search: SearchService::new(store.clone(), compiler, names.properties.clone()),
            recommendations: RecommendationEngine::new(store.clone(), names.properties.clone()),
            stats: StatsService::new(store.clone(), names.properties.clone(), &config.search),
            conversations: ConversationLog::new(store.clone(), names.conversations),
            catalog: CatalogWriter::new(store.clone(), embedder.clone(), names.properties),
            store,
            embedder,
        }
    }

    /// Ranked property search
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.search.search(request).await
    }

    /// Catalog statistics
    pub async fn stats(&self) -> Result<CatalogStats> {
        self.stats.stats().await
    }

    /// Similar-property recommendations
    pub async fn recommend(&self, property_id: &str, limit: usize) -> Result<Vec<PropertyView>> {
        self.recommendations.recommend(property_id, limit).await
    }

    pub fn conversations(&self) -> &ConversationLog {
        &self.conversations
    }

    pub fn catalog(&self) -> &CatalogWriter {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Whether the AI subsystem was available at startup
    pub fn ai_available(&self) -> bool {
        self.embedder.is_some()
    }
}
