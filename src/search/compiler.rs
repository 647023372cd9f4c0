use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};
use tracing::debug;

use crate::config::SearchTuning;

/// Ranking strategy selected by the caller
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchMode {
    Keyword,
    Semantic,
    #[default]
    Hybrid,
}

/// A compiled ranking query plus the strategy that actually produced it.
/// `strategy` differs from the requested mode only when the AI subsystem is
/// unavailable and the compilation degraded to the keyword base query.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub body: Value,
    pub strategy: SearchMode,
}

/// Compiles ranking queries. Pure given `{query, mode}` once constructed:
/// the AI capability is an explicit flag threaded in at startup, never
/// probed per call.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    tuning: SearchTuning,
    ai_available: bool,
}

impl QueryCompiler {
    /// `tuning` carries the configured vector/keyword weights, validated at
    /// load time. The documented ranking consults field boosts only; the
    /// weights stay on the compiler for a score-fusion clause against the
    /// stored vector field, which remains a recorded candidate enhancement.
    pub fn new(tuning: SearchTuning, ai_available: bool) -> Self {
        Self {
            tuning,
            ai_available,
        }
    }

    pub fn ai_available(&self) -> bool {
        self.ai_available
    }

    pub fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    /// Compile a ranking query for the given mode. Semantic and hybrid
    /// widen the base disjunction with audience/feature clauses; without
    /// the AI subsystem both degrade to the keyword base query.
    pub fn compile(&self, query: &str, mode: SearchMode) -> CompiledQuery {
        let mut should = vec![
            json!({
                "multi_match": {
                    "query": query,
                    "fields": [
                        "name^3",
                        "description^2",
                        "property_type^2",
                        "address.city^2",
                        "address.locality",
                        "amenities"
                    ],
                    "type": "best_fields",
                    "fuzziness": "AUTO"
                }
            }),
            json!({
                "match": {
                    "combined_text": {
                        "query": query,
                        "boost": 1.5
                    }
                }
            }),
        ];

        let strategy = match mode {
            SearchMode::Semantic if self.ai_available => {
                should.extend([
                    boosted_match("target_audience", query, 2.5),
                    boosted_match("special_features", query, 1.5),
                    boosted_match("platform_focus", query, 1.2),
                ]);
                SearchMode::Semantic
            }
            SearchMode::Hybrid if self.ai_available => {
                should.extend([
                    boosted_match("target_audience", query, 2.0),
                    boosted_match("special_features", query, 1.5),
                ]);
                SearchMode::Hybrid
            }
            SearchMode::Keyword => SearchMode::Keyword,
            requested => {
                debug!(
                    requested = %requested,
                    "AI subsystem unavailable, compiling keyword base query"
                );
                SearchMode::Keyword
            }
        };

        CompiledQuery {
            body: json!({
                "bool": {
                    "should": should,
                    "minimum_should_match": 1
                }
            }),
            strategy,
        }
    }
}

fn boosted_match(field: &str, query: &str, boost: f64) -> Value {
    json!({
        "match": {
            (field): {
                "query": query,
                "boost": boost
            }
        }
    })
}
