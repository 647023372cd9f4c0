//! Ranked property search core for a rental accommodation platform.
//!
//! This crate owns everything between an HTTP layer (external) and a
//! document/vector store (external):
//!
//! - **Schema Definition**: property, conversation, inquiry and site-visit
//!   index mappings, including the custom text-analysis chain with domain
//!   synonym classes and a 768-dimension embedding field
//! - **Query Compiler**: deterministic ranking queries for the keyword,
//!   semantic and hybrid strategies, degrading gracefully to keyword when
//!   the AI platform is unavailable
//! - **Recommendation Engine**: cosine similarity over stored embeddings
//! - **Aggregation**: exact totals plus sample-based facet statistics
//! - **Store contract**: the narrow async operation set the core consumes,
//!   with an HTTP implementation and a shared retry policy
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  App handle                  │
//! │  search() · stats() · recommend()            │
//! └──────────────────────────────────────────────┘
//!          │                │
//!          ▼                ▼
//! ┌────────────────┐  ┌──────────────────────────┐
//! │ Query Compiler │  │ Recommendation / Stats   │
//! │ (pure)         │  │ (store-direct)           │
//! └────────────────┘  └──────────────────────────┘
//!          │                │
//!          ▼                ▼
//! ┌──────────────────────────────────────────────┐
//! │        DocumentStore contract (async)        │
//! │        HttpDocumentStore → external store    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rental_search::{App, Config, SearchMode, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::init(Config::load()?).await?;
//!
//!     let request = SearchRequest::new("2 bhk apartment near metro")
//!         .with_limit(5)
//!         .with_mode(SearchMode::Hybrid);
//!
//!     let results = app.search(&request).await?;
//!     println!("{} matches via {}", results.total, results.mode);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod conversations;
pub mod embedding;
pub mod error;
pub mod models;
pub mod recommend;
pub mod schema;
pub mod search;
pub mod stats;
pub mod store;
pub mod telemetry;

pub use app::App;
pub use config::Config;
pub use error::{AppError, Result};
pub use search::{SearchMode, SearchRequest, SearchResults};
