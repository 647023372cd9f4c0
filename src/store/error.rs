use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors returned by document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (connect failure, timeout)
    #[error("document store unreachable: {0}")]
    Unreachable(String),

    /// The store answered with a non-success status
    #[error("document store returned status {status}: {body}")]
    Response { status: u16, body: String },

    /// Requested document does not exist
    #[error("document {id} not found in index {index}")]
    NotFound { index: String, id: String },

    /// A response body could not be decoded
    #[error("store response decoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response was well-formed JSON with an unexpected shape
    #[error("unexpected store response shape: {0}")]
    UnexpectedResponse(String),
}

impl StoreError {
    /// Classify a transport-level error from the HTTP client
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Unreachable(format!("request timed out: {err}"))
        } else if err.is_connect() {
            StoreError::Unreachable(format!("connection failed: {err}"))
        } else {
            StoreError::Unreachable(err.to_string())
        }
    }

    /// Whether retrying the operation can reasonably succeed. Connection
    /// failures and server-side 5xx responses are transient; everything else
    /// is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Unreachable(_) => true,
            StoreError::Response { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StoreError::Unreachable("refused".into()).is_transient());
        assert!(StoreError::Response {
            status: 503,
            body: "busy".into()
        }
        .is_transient());
        assert!(!StoreError::Response {
            status: 400,
            body: "bad mapping".into()
        }
        .is_transient());
        assert!(!StoreError::NotFound {
            index: "props".into(),
            id: "p1".into()
        }
        .is_transient());
    }
}
