use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::AiPlatformConfig;

use super::{EmbeddingError, EmbeddingProvider, EmbeddingResult};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Embedding client for a Vertex-style prediction API. Tries each
/// configured model in priority order; the first vector wins.
pub struct VertexEmbedder {
    client: Client,
    models: Vec<String>,
    project: String,
    location: String,
    access_token: Option<String>,
    endpoint_override: Option<String>,
}

impl VertexEmbedder {
    /// Build an embedder from platform configuration. Returns `None` when
    /// the configuration is incomplete; the caller treats that as the AI
    /// subsystem being unavailable.
    pub fn from_config(config: &AiPlatformConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .ok()?;
        Some(Self {
            client,
            models: config.embedding_models.clone(),
            project: config.project.clone()?,
            location: config.location.clone(),
            access_token: config.access_token.clone(),
            endpoint_override: config.endpoint.clone(),
        })
    }

    fn predict_url(&self, model: &str) -> String {
        match &self.endpoint_override {
            Some(base) => format!(
                "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
                base.trim_end_matches('/'),
                self.project,
                self.location,
                model
            ),
            None => format!(
                "https://{loc}-aiplatform.googleapis.com/v1/projects/{proj}/locations/{loc}/publishers/google/models/{model}:predict",
                loc = self.location,
                proj = self.project,
                model = model
            ),
        }
    }

    async fn embed_with_model(&self, model: &str, text: &str) -> Result<Vec<f32>, String> {
        let mut request = self
            .client
            .post(self.predict_url(model))
            .json(&json!({ "instances": [{ "content": text }] }));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("status {status}: {body}"));
        }

        let payload: Value = response.json().await.map_err(|e| e.to_string())?;
        let values = payload
            .pointer("/predictions/0/embeddings/values")
            .and_then(Value::as_array)
            .ok_or_else(|| "prediction response missing embedding values".to_string())?;

        let vector: Vec<f32> = values
            .iter()
            .filter_map(Value::as_f64)
            .map(|v| v as f32)
            .collect();
        if vector.is_empty() {
            return Err("prediction returned an empty vector".to_string());
        }
        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingProvider for VertexEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult {
        for model in &self.models {
            match self.embed_with_model(model, text).await {
                Ok(vector) => {
                    debug!(model = %model, dimension = vector.len(), "Generated embedding");
                    return Ok(vector);
                }
                Err(reason) => {
                    warn!(model = %model, reason = %reason, "Embedding model failed, trying next");
                }
            }
        }
        Err(EmbeddingError::ModelsExhausted {
            attempted: self.models.len(),
        })
    }
}
