use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Connection refused, DNS failure, timeout, or a broken response body.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint {url}: {reason}")]
    Endpoint { url: String, reason: String },
}

impl SubmitError {
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}
