use serde_json::Value;
use tracing::info;

use crate::config::IndexNames;
use crate::store::{DocumentStore, RetryPolicy, StoreResult};

use super::{
    conversations_mapping, inquiries_mapping, properties_mapping, site_visits_mapping,
};

/// Outcome of an idempotent index-ensure operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// Ensure an index exists with the given mapping. Idempotent; transient
/// failures are retried under `policy`, a persistent failure after the
/// final attempt is returned to the caller.
pub async fn ensure_index(
    store: &dyn DocumentStore,
    policy: &RetryPolicy,
    name: &str,
    mapping: &Value,
) -> StoreResult<EnsureOutcome> {
    policy
        .run(name, || async {
            if store.exists(name).await? {
                info!(index = name, "Index already exists");
                return Ok(EnsureOutcome::AlreadyExists);
            }
            store.create_index(name, mapping).await?;
            info!(index = name, "Created index");
            Ok(EnsureOutcome::Created)
        })
        .await
}

/// Ensure all indices owned by this service exist. Called once at startup.
pub async fn ensure_all(
    store: &dyn DocumentStore,
    policy: &RetryPolicy,
    names: &IndexNames,
) -> StoreResult<()> {
    ensure_index(store, policy, &names.properties, &properties_mapping()).await?;
    ensure_index(store, policy, &names.conversations, &conversations_mapping()).await?;
    ensure_index(store, policy, &names.inquiries, &inquiries_mapping()).await?;
    ensure_index(store, policy, &names.site_visits, &site_visits_mapping()).await?;
    Ok(())
}
