// Single-request JSON accessor
//
// One reqwest client, fixed timeout, mobile User-Agent (some mirrors
// reject default client UAs). No retry here — rotation owns retries.

use std::time::Duration;

use super::errors::FetchError;

/// Transport-level timeout in seconds
const HTTP_TIMEOUT_SECS: u64 = 5;

/// Some mirrors reject default client UAs; send a mobile one
const USER_AGENT: &str = "Mozilla/5.0 (Android 10)";

pub struct HttpAccessor {
    client: reqwest::Client,
}

impl HttpAccessor {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    /// Custom timeout, used by tests to fail fast.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client with timeout");

        Self { client }
    }

    /// GET the URL and parse the body as JSON. Non-2xx is a failure.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(value)
    }
}

impl Default for HttpAccessor {
    fn default() -> Self {
        Self::new()
    }
}
