use thiserror::Error;

/// Custom error type for the status dashboard
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{url} returned status {status}")]
    BadStatus { url: String, status: u16 },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Result type alias for the status dashboard
pub type Result<T> = std::result::Result<T, StatusError>;

impl StatusError {
    /// Create a fetch error
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        StatusError::Fetch(msg.into())
    }

    pub fn scheduler<S: Into<String>>(msg: S) -> Self {
        StatusError::Scheduler(msg.into())
    }

    /// Short reason shown next to a stale display target
    pub fn short_reason(&self) -> String {
        match self {
            StatusError::BadStatus { status, .. } => format!("HTTP {}", status),
            StatusError::Http(e) if e.is_timeout() => "timed out".to_string(),
            StatusError::Http(e) if e.is_connect() => "connection failed".to_string(),
            StatusError::Json(_) => "malformed response".to_string(),
            StatusError::Fetch(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reason() {
        let bad = StatusError::BadStatus {
            url: "http://localhost:5000/api/ping".to_string(),
            status: 502,
        };
        assert_eq!(bad.short_reason(), "HTTP 502");
        assert_eq!(StatusError::fetch("connection refused").short_reason(), "connection refused");

        let json = serde_json::from_str::<u8>("{").unwrap_err();
        assert_eq!(StatusError::from(json).short_reason(), "malformed response");
    }
}
