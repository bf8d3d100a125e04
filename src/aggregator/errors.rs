// Error types for the aggregation client

use std::fmt;

#[derive(Debug, Clone)]
pub enum FetchError {
    /// Request exceeded the fixed timeout budget
    Timeout,

    /// Upstream answered with a non-2xx status
    Status(u16),

    /// Connection-level failure (DNS, TLS, refused, ...)
    Network(String),

    /// Response body was not the JSON shape we expected
    Parse(String),

    /// Rotation exhausted the attempt bound without a success
    AllMirrorsFailed,

    /// Streams payload carried neither an HLS manifest nor a progressive URL
    MissingStream(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timeout: mirror is not responding"),
            Self::Status(code) => write!(f, "Mirror returned status {}", code),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::AllMirrorsFailed => write!(f, "All mirrors failed"),
            Self::MissingStream(id) => write!(f, "No playable stream in response for {}", id),
        }
    }
}

impl std::error::Error for FetchError {}

// Classify transport errors coming out of reqwest
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }
        if e.is_decode() {
            return Self::Parse(e.to_string());
        }
        if let Some(status) = e.status() {
            return Self::Status(status.as_u16());
        }
        Self::Network(e.to_string())
    }
}

impl FetchError {
    /// Whether rotating to another mirror could plausibly help.
    /// Parse errors are mirror-specific too (stale API forks), so
    /// everything short of exhaustion is retryable.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::AllMirrorsFailed)
    }
}
