use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::Result;
use crate::models::PropertyView;
use crate::store::{DocumentStore, StoreQuery};

use super::compiler::{QueryCompiler, SearchMode};

/// A search request as received from the HTTP layer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Free-text query over the catalog
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,

    /// Number of results to return
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    #[serde(default = "default_request_limit")]
    pub limit: usize,

    /// Ranking strategy
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_request_limit() -> usize {
    10
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: default_request_limit(),
            mode: SearchMode::default(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// One ranked result: the property view, its relevance score and the
/// strategy that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: PropertyView,

    /// Relevance score assigned by the document store
    pub score: f32,

    /// Strategy actually used for this result set
    pub strategy: SearchMode,
}

/// Ranked result set with the metadata needed to audit which ranking path
/// ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<ScoredProperty>,
    pub total: u64,
    /// Strategy actually used; reports `keyword` when a semantic or hybrid
    /// request degraded
    pub mode: SearchMode,
}

/// Ranked property search over the document store
pub struct SearchService {
    store: Arc<dyn DocumentStore>,
    compiler: QueryCompiler,
    index: String,
}

impl SearchService {
    pub fn new(store: Arc<dyn DocumentStore>, compiler: QueryCompiler, index: String) -> Self {
        Self {
            store,
            compiler,
            index,
        }
    }

    /// Execute a ranked search. Zero hits is a valid outcome; an
    /// unreachable store surfaces as `AppError::Unavailable`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        request.validate()?;

        let compiled = self.compiler.compile(&request.query, request.mode);
        info!(
            query = %request.query,
            requested_mode = %request.mode,
            strategy = %compiled.strategy,
            limit = request.limit,
            "Executing property search"
        );

        let hits = self
            .store
            .search(&self.index, &StoreQuery::new(compiled.body, request.limit))
            .await?;

        let results = hits
            .hits
            .iter()
            .map(|hit| ScoredProperty {
                property: PropertyView::from_source(&hit.source),
                score: hit.score.unwrap_or_default(),
                strategy: compiled.strategy,
            })
            .collect();

        Ok(SearchResults {
            query: request.query.clone(),
            results,
            total: hits.total,
            mode: compiled.strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_limit_bounds() {
        assert!(SearchRequest::new("flat").with_limit(0).validate().is_err());
        assert!(SearchRequest::new("flat").with_limit(51).validate().is_err());
        assert!(SearchRequest::new("flat").with_limit(1).validate().is_ok());
        assert!(SearchRequest::new("flat").with_limit(50).validate().is_ok());
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(SearchRequest::new("").validate().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::new("2 bhk");
        assert_eq!(request.limit, 10);
        assert_eq!(request.mode, SearchMode::Hybrid);
    }
}
