//! Conversation history over the document store.
//!
//! The log is append-only and advisory: a failed append is logged and never
//! fails the chat turn that produced it. Reads fetch most-recent-first and
//! hand back chronological order.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::Result;
use crate::models::ConversationMessage;
use crate::store::{DocumentStore, StoreQuery};

pub struct ConversationLog {
    store: Arc<dyn DocumentStore>,
    index: String,
}

impl ConversationLog {
    pub fn new(store: Arc<dyn DocumentStore>, index: String) -> Self {
        Self { store, index }
    }

    /// Append a message to the session log. Failures are logged, not
    /// propagated; losing a history entry must not fail the caller.
    pub async fn append(&self, message: &ConversationMessage) {
        let id = Uuid::new_v4().to_string();
        let body = match serde_json::to_value(message) {
            Ok(body) => body,
            Err(e) => {
                error!(session_id = %message.session_id, error = %e, "Failed to serialize conversation message");
                return;
            }
        };

        match self.store.index_document(&self.index, &id, &body, false).await {
            Ok(()) => {
                debug!(session_id = %message.session_id, "Saved conversation message")
            }
            Err(e) => {
                error!(session_id = %message.session_id, error = %e, "Failed to save conversation message")
            }
        }
    }

    /// Retrieve up to `limit` most recent messages for a session, in
    /// chronological order.
    pub async fn history(&self, session_id: &str, limit: usize) -> Result<Vec<ConversationMessage>> {
        let request = StoreQuery::new(json!({"term": {"session_id": session_id}}), limit)
            .with_sort(json!([{"timestamp": {"order": "desc"}}]));

        let outcome = self.store.search(&self.index, &request).await?;

        let mut messages: Vec<ConversationMessage> = outcome
            .hits
            .iter()
            .filter_map(|hit| serde_json::from_value(hit.source.clone()).ok())
            .collect();

        // The store returns newest first; callers want chronological order.
        messages.reverse();
        Ok(messages)
    }
}
