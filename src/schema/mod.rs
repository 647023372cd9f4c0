//! Index schema definitions and lifecycle.
//!
//! Declares, once, the field-level contract every downstream component
//! relies on: the property index with its custom analysis chain, geo and
//! nested fields and the 768-dimension embedding vector, plus the three
//! auxiliary indices (conversations, inquiries, site visits). Index creation
//! is a one-time, cluster-wide schema commitment; fields are immutable for
//! the lifetime of an index.

mod analysis;
mod auxiliary;
mod bootstrap;
mod properties;

pub use analysis::{analysis_settings, SYNONYM_CLASSES};
pub use auxiliary::{conversations_mapping, inquiries_mapping, site_visits_mapping};
pub use bootstrap::{ensure_all, ensure_index, EnsureOutcome};
pub use properties::properties_mapping;
