// Content source trait definition

use async_trait::async_trait;

use super::errors::FetchError;
use super::models::VideoRecord;

/// Trait for live content source implementations. The production source
/// is the Piped mirror client; tests inject doubles to exercise the
/// fallback policy deterministically.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// Trending feed for a region code
    async fn trending(&self, region: &str) -> Result<Vec<VideoRecord>, FetchError>;

    /// Free-text search
    async fn search(&self, query: &str) -> Result<Vec<VideoRecord>, FetchError>;

    /// Autocomplete strings for a partial query
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, FetchError>;

    /// Resolve a playable media URL for one video id
    async fn resolve_stream(&self, id: &str) -> Result<String, FetchError>;
}
