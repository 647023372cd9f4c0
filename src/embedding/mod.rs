//! Embedding generation contract against the external AI platform.
//!
//! The provider turns text into a fixed-length vector. Implementations walk
//! a prioritized model list; individual model failures are non-fatal and
//! only exhaustion of the whole list fails the call. Providers are
//! stateless and safe to share across concurrent requests.

mod vertex;

use async_trait::async_trait;
use thiserror::Error;

pub use vertex::VertexEmbedder;

/// Errors from embedding generation
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Every configured model failed
    #[error("all {attempted} embedding models failed")]
    ModelsExhausted { attempted: usize },

    /// No model list or credentials configured
    #[error("embedding provider is not configured")]
    NotConfigured,
}

pub type EmbeddingResult = std::result::Result<Vec<f32>, EmbeddingError>;

/// Text-to-vector contract
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for the given text
    async fn embed(&self, text: &str) -> EmbeddingResult;
}
