//! Ranked property search.
//!
//! The compiler turns `{query string, mode, capability flag, weights}` into
//! a deterministic ranking query against the document store; the service
//! dispatches compiled queries and maps scored hits into property views.
//! When the AI subsystem is unavailable, semantic and hybrid modes degrade
//! to the keyword strategy and the response labels the strategy actually
//! used.

mod compiler;
mod service;

pub use compiler::{CompiledQuery, QueryCompiler, SearchMode};
pub use service::{ScoredProperty, SearchRequest, SearchResults, SearchService};
