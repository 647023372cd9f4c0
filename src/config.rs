use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Document store configuration
    pub store: StoreConfig,

    /// AI platform configuration
    #[serde(default)]
    pub ai: AiPlatformConfig,

    /// Search tuning
    #[validate(nested)]
    pub search: SearchTuning,
}

impl Config {
    /// Load configuration from embedded defaults, an optional file and the
    /// environment, then validate it. Invalid values (e.g. a ranking weight
    /// outside [0,1]) fail here, before any service is constructed.
    pub fn load() -> Result<Self, crate::error::AppError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        let config: Config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: RENTAL)
            .add_source(
                config::Environment::with_prefix("RENTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

/// Well-known local endpoint tried when the configured store is unreachable
/// at startup.
pub const LOCAL_FALLBACK_ENDPOINT: &str = "http://localhost:9200";

/// Document store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Full endpoint URL; overrides scheme/host/port when set
    pub url: Option<String>,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_store_host")]
    pub host: String,

    #[serde(default = "default_store_port")]
    pub port: u16,

    /// Basic auth username (ignored when an API key is configured)
    pub username: Option<String>,

    /// Basic auth password
    pub password: Option<String>,

    /// API key authentication, used by managed deployments
    pub api_key: Option<String>,

    /// Prefix for all index names owned by this service
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    /// Full store endpoint URL
    pub fn endpoint(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{}://{}:{}", self.scheme, self.host, self.port),
        }
    }

    pub fn properties_index(&self) -> String {
        format!("{}_properties", self.index_prefix)
    }

    pub fn conversations_index(&self) -> String {
        format!("{}_conversations", self.index_prefix)
    }

    pub fn inquiries_index(&self) -> String {
        format!("{}_inquiries", self.index_prefix)
    }

    pub fn site_visits_index(&self) -> String {
        format!("{}_site_visits", self.index_prefix)
    }

    /// All index names, in bootstrap order
    pub fn index_names(&self) -> IndexNames {
        IndexNames {
            properties: self.properties_index(),
            conversations: self.conversations_index(),
            inquiries: self.inquiries_index(),
            site_visits: self.site_visits_index(),
        }
    }
}

/// Resolved names of the four indices owned by this service
#[derive(Debug, Clone)]
pub struct IndexNames {
    pub properties: String,
    pub conversations: String,
    pub inquiries: String,
    pub site_visits: String,
}

/// AI platform (embedding generation) settings. When `project` is absent the
/// AI subsystem is considered unavailable and semantic/hybrid search degrades
/// to the keyword strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiPlatformConfig {
    /// Cloud project hosting the embedding models
    pub project: Option<String>,

    /// Platform region
    #[serde(default = "default_ai_location")]
    pub location: String,

    /// Prioritized list of embedding model identifiers; the first model that
    /// returns a vector wins
    #[serde(default)]
    pub embedding_models: Vec<String>,

    /// Bearer token for the platform API. Acquiring credentials is the
    /// deployment environment's concern.
    pub access_token: Option<String>,

    /// Endpoint override, used by tests and self-hosted gateways
    pub endpoint: Option<String>,
}

impl AiPlatformConfig {
    /// Whether enough configuration is present to call the platform
    pub fn is_configured(&self) -> bool {
        self.project.is_some() && !self.embedding_models.is_empty()
    }
}

/// Ranking and result-set tuning
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchTuning {
    /// Weight of the vector component in hybrid ranking
    #[validate(range(min = 0.0, max = 1.0, message = "weight must be between 0 and 1"))]
    #[serde(default = "default_vector_weight")]
    pub vector_weight: f64,

    /// Weight of the keyword component in hybrid ranking
    #[validate(range(min = 0.0, max = 1.0, message = "weight must be between 0 and 1"))]
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Limit applied when the caller does not provide one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard cap on the caller-supplied result limit
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Number of documents sampled for facet statistics
    #[serde(default = "default_stats_sample_size")]
    pub stats_sample_size: usize,

    /// Maximum distinct values reported per facet
    #[serde(default = "default_facet_limit")]
    pub facet_limit: usize,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            vector_weight: default_vector_weight(),
            keyword_weight: default_keyword_weight(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            stats_sample_size: default_stats_sample_size(),
            facet_limit: default_facet_limit(),
        }
    }
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_store_host() -> String {
    "localhost".to_string()
}

fn default_store_port() -> u16 {
    9200
}

fn default_index_prefix() -> String {
    "rental_search".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_ai_location() -> String {
    "us-central1".to_string()
}

fn default_vector_weight() -> f64 {
    0.7
}

fn default_keyword_weight() -> f64 {
    0.3
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    50
}

fn default_stats_sample_size() -> usize {
    100
}

fn default_facet_limit() -> usize {
    20
}
