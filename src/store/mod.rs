//! Document store operation contract and its HTTP implementation.
//!
//! All catalog state lives in an external document/vector store; this module
//! defines the narrow contract the rest of the crate consumes (index
//! lifecycle, single/bulk writes, point reads, ranked search, counts) plus a
//! reqwest-based client speaking the store's REST API. Services hold the
//! contract as `Arc<dyn DocumentStore>` so tests can substitute an in-memory
//! fake.

mod error;
mod http;
mod retry;

use async_trait::async_trait;
use serde_json::Value;

pub use error::{StoreError, StoreResult};
pub use http::HttpDocumentStore;
pub use retry::RetryPolicy;

/// A ranked search request body: the compiled query plus execution options.
#[derive(Debug, Clone)]
pub struct StoreQuery {
    /// Query clause tree, in the store's native JSON DSL
    pub query: Value,

    /// Maximum hits to return
    pub size: usize,

    /// Optional sort specification; relevance order when absent
    pub sort: Option<Value>,

    /// Optional aggregations computed alongside the hits
    pub aggregations: Option<Value>,
}

impl StoreQuery {
    pub fn new(query: Value, size: usize) -> Self {
        Self {
            query,
            size,
            sort: None,
            aggregations: None,
        }
    }

    pub fn with_sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_aggregations(mut self, aggregations: Value) -> Self {
        self.aggregations = Some(aggregations);
        self
    }
}

/// One scored hit returned by a search
#[derive(Debug, Clone)]
pub struct StoreHit {
    pub id: String,
    pub score: Option<f32>,
    pub source: Value,
}

/// Result set of a search: hits in rank order plus the total match count
/// and any aggregation payload.
#[derive(Debug, Clone, Default)]
pub struct StoreHits {
    pub hits: Vec<StoreHit>,
    pub total: u64,
    pub aggregations: Option<Value>,
}

/// Per-item outcome report of a bulk write. A partial failure is data, not
/// an error: successful items remain committed.
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    pub success_count: usize,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone)]
pub struct BulkFailure {
    pub id: String,
    pub reason: String,
}

/// Operation contract against the external document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether an index exists
    async fn exists(&self, index: &str) -> StoreResult<bool>;

    /// Create an index with the given mapping
    async fn create_index(&self, index: &str, mapping: &Value) -> StoreResult<()>;

    /// Index (create or overwrite) a single document
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        body: &Value,
        refresh: bool,
    ) -> StoreResult<()>;

    /// Bulk index documents; reports per-item failures
    async fn bulk_index(&self, index: &str, docs: &[(String, Value)]) -> StoreResult<BulkReport>;

    /// Fetch a document by id; `None` when it does not exist
    async fn get(&self, index: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Execute a ranked search
    async fn search(&self, index: &str, request: &StoreQuery) -> StoreResult<StoreHits>;

    /// Exact document count for an index
    async fn count(&self, index: &str) -> StoreResult<u64>;
}
