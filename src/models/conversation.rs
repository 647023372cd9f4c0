use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn in a chat session. Append-only; ordered by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub session_id: String,

    pub user_id: String,

    pub timestamp: DateTime<Utc>,

    pub role: MessageRole,

    pub message: String,

    /// Arbitrary conversational context captured with the turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Snapshot of search results shown alongside this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Value>,
}

impl ConversationMessage {
    pub fn new(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        role: MessageRole,
        message: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            role,
            message: message.into(),
            context: None,
            search_results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let role: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(role, MessageRole::Assistant);
    }

    #[test]
    fn test_optional_payloads_omitted() {
        let message = ConversationMessage::new("s-1", "u-1", MessageRole::User, "2 bhk near metro");
        let value = serde_json::to_value(&message).unwrap();
        assert!(value.get("context").is_none());
        assert!(value.get("search_results").is_none());
    }
}
