use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{StoreConfig, LOCAL_FALLBACK_ENDPOINT};

use super::error::{StoreError, StoreResult};
use super::{BulkFailure, BulkReport, DocumentStore, StoreHit, StoreHits, StoreQuery};

/// Authentication material for the store's REST API
#[derive(Debug, Clone)]
enum StoreAuth {
    ApiKey(String),
    Basic { username: String, password: String },
    None,
}

/// Document store client over the store's REST API. One instance is
/// constructed at startup and shared read-only across all request handlers.
pub struct HttpDocumentStore {
    client: Client,
    endpoint: String,
    auth: StoreAuth,
}

impl HttpDocumentStore {
    /// Connect to the configured endpoint. On failure, attempt the
    /// well-known local default before giving up; the fallback happens once
    /// at startup and is never re-attempted mid-request.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        let auth = match (&config.api_key, &config.username, &config.password) {
            (Some(key), _, _) => StoreAuth::ApiKey(key.clone()),
            (None, Some(user), Some(pass)) => StoreAuth::Basic {
                username: user.clone(),
                password: pass.clone(),
            },
            _ => StoreAuth::None,
        };

        let endpoint = config.endpoint();
        let store = Self {
            client,
            endpoint: endpoint.clone(),
            auth,
        };

        match store.ping().await {
            Ok(info) => {
                info!(endpoint = %endpoint, version = %info, "Connected to document store");
                Ok(store)
            }
            Err(err) if endpoint != LOCAL_FALLBACK_ENDPOINT => {
                warn!(
                    endpoint = %endpoint,
                    error = %err,
                    "Configured document store unreachable, trying local fallback"
                );
                let fallback = Self {
                    endpoint: LOCAL_FALLBACK_ENDPOINT.to_string(),
                    auth: StoreAuth::Basic {
                        username: "elastic".to_string(),
                        password: "changeme".to_string(),
                    },
                    ..store
                };
                let info = fallback.ping().await?;
                info!(
                    endpoint = LOCAL_FALLBACK_ENDPOINT,
                    version = %info,
                    "Fallback connection to local document store succeeded"
                );
                Ok(fallback)
            }
            Err(err) => Err(err),
        }
    }

    /// Build a client without the reachability probe. Used by tests that
    /// point at a mock server.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout_secs: u64) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Unreachable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            auth: StoreAuth::None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the root endpoint; returns the reported engine version
    async fn ping(&self) -> StoreResult<String> {
        let response = self
            .authorize(self.client.get(&self.endpoint))
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        let body: Value = Self::expect_success(response).await?.json().await.map_err(|e| {
            StoreError::UnexpectedResponse(format!("info response was not JSON: {e}"))
        })?;
        Ok(body
            .pointer("/version/number")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            StoreAuth::ApiKey(key) => request.header("Authorization", format!("ApiKey {key}")),
            StoreAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            StoreAuth::None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    /// Map a non-success response into a `StoreError::Response`
    async fn expect_success(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Response {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::UnexpectedResponse(format!("body read failed: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn exists(&self, index: &str) -> StoreResult<bool> {
        let response = self
            .authorize(self.client.head(self.url(index)))
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::Response {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> StoreResult<()> {
        let response = self
            .authorize(self.client.put(self.url(index)))
            .json(mapping)
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        Self::expect_success(response).await?;
        debug!(index, "Index created");
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        body: &Value,
        refresh: bool,
    ) -> StoreResult<()> {
        let mut url = self.url(&format!("{index}/_doc/{id}"));
        if refresh {
            url.push_str("?refresh=true");
        }
        let response = self
            .authorize(self.client.put(url))
            .json(body)
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        Self::expect_success(response).await?;
        debug!(index, id, "Document indexed");
        Ok(())
    }

    async fn bulk_index(&self, index: &str, docs: &[(String, Value)]) -> StoreResult<BulkReport> {
        if docs.is_empty() {
            return Ok(BulkReport::default());
        }

        let mut payload = String::new();
        for (id, body) in docs {
            payload.push_str(&json!({ "index": { "_index": index, "_id": id } }).to_string());
            payload.push('\n');
            payload.push_str(&body.to_string());
            payload.push('\n');
        }

        let response = self
            .authorize(self.client.post(self.url("_bulk")))
            .header("Content-Type", "application/x-ndjson")
            .body(payload)
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        let body: Value = Self::decode(Self::expect_success(response).await?).await?;

        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| StoreError::UnexpectedResponse("bulk response missing items".into()))?;

        let mut report = BulkReport::default();
        for item in items {
            let action = item
                .get("index")
                .or_else(|| item.get("create"))
                .unwrap_or(item);
            let id = action
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match action.get("error") {
                Some(error) if !error.is_null() => report.failed.push(BulkFailure {
                    id,
                    reason: error.to_string(),
                }),
                _ => report.success_count += 1,
            }
        }
        Ok(report)
    }

    async fn get(&self, index: &str, id: &str) -> StoreResult<Option<Value>> {
        let response = self
            .authorize(self.client.get(self.url(&format!("{index}/_doc/{id}"))))
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: Value = Self::decode(Self::expect_success(response).await?).await?;
        Ok(body.get("_source").cloned())
    }

    async fn search(&self, index: &str, request: &StoreQuery) -> StoreResult<StoreHits> {
        let mut body = json!({
            "query": request.query,
            "size": request.size,
        });
        if let Some(sort) = &request.sort {
            body["sort"] = sort.clone();
        }
        if let Some(aggregations) = &request.aggregations {
            body["aggs"] = aggregations.clone();
        }

        let response = self
            .authorize(self.client.post(self.url(&format!("{index}/_search"))))
            .json(&body)
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        let payload: Value = Self::decode(Self::expect_success(response).await?).await?;

        let raw_hits = payload
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .ok_or_else(|| StoreError::UnexpectedResponse("search response missing hits".into()))?;

        let hits = raw_hits
            .iter()
            .map(|hit| StoreHit {
                id: hit
                    .get("_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                score: hit.get("_score").and_then(Value::as_f64).map(|s| s as f32),
                source: hit.get("_source").cloned().unwrap_or(Value::Null),
            })
            .collect();

        let total = payload
            .pointer("/hits/total/value")
            .and_then(Value::as_u64)
            .unwrap_or(raw_hits.len() as u64);

        Ok(StoreHits {
            hits,
            total,
            aggregations: payload.get("aggregations").cloned(),
        })
    }

    async fn count(&self, index: &str) -> StoreResult<u64> {
        let response = self
            .authorize(self.client.get(self.url(&format!("{index}/_count"))))
            .send()
            .await
            .map_err(StoreError::from_transport)?;
        let body: Value = Self::decode(Self::expect_success(response).await?).await?;
        body.get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| StoreError::UnexpectedResponse("count response missing count".into()))
    }
}
