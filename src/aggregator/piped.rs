// Piped mirror source - the only live network path
//
// Builds request paths for the four upstream operations, walks the
// mirror list on failure, and maps raw Piped payloads into VideoRecord.
// Callers above this layer never see raw payload shapes.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::errors::FetchError;
use super::format::{duration_label, format_views};
use super::http::HttpAccessor;
use super::models::{Platform, VideoRecord};
use super::rotation::{MirrorRotator, MAX_ATTEMPTS};
use super::traits::ContentSource;

lazy_static! {
    // Piped hands back relative watch URLs like "/watch?v=dQw4w9WgXcQ"
    static ref VIDEO_ID_RE: Regex = Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").unwrap();
}

/// Trending and search entries share this shape; search wraps them in an
/// items envelope with a type discriminator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideoItem {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    uploader_name: String,
    #[serde(default)]
    views: i64,
    #[serde(default)]
    uploaded_date: Option<String>,
    #[serde(default)]
    duration: i64,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    uploader_avatar: Option<String>,
    #[serde(default)]
    is_short: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawSearchEnvelope {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStreamsPayload {
    #[serde(default)]
    hls: Option<String>,
    #[serde(default)]
    video_streams: Vec<RawVideoStream>,
}

#[derive(Debug, Deserialize)]
struct RawVideoStream {
    #[serde(default)]
    url: Option<String>,
}

impl RawVideoItem {
    fn into_record(self) -> VideoRecord {
        let id = VIDEO_ID_RE
            .captures(&self.url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "0".to_string());

        VideoRecord {
            id,
            title: self.title,
            uploader: self.uploader_name,
            views: format_views(self.views.max(0) as u64),
            date: self.uploaded_date.unwrap_or_else(|| "Recently".to_string()),
            duration: duration_label(self.duration),
            thumbnail: self.thumbnail,
            platform: Platform::YouTube,
            avatar: self.uploader_avatar.unwrap_or_default(),
            country: None,
            stream_url: None,
            is_short: self.is_short,
        }
    }
}

/// Live source backed by the public Piped mirrors.
pub struct PipedSource {
    http: HttpAccessor,
    rotator: MirrorRotator,
}

impl PipedSource {
    pub fn new() -> Self {
        Self::with_parts(HttpAccessor::new(), MirrorRotator::new())
    }

    /// Injectable pieces for tests (local mock mirrors, short timeouts).
    pub fn with_parts(http: HttpAccessor, rotator: MirrorRotator) -> Self {
        Self { http, rotator }
    }

    /// Try the path against the current mirror; advance and retry on
    /// failure, up to MAX_ATTEMPTS mirrors. Success leaves the cursor on
    /// the mirror that answered.
    async fn fetch_rotating(&self, path: &str) -> Result<serde_json::Value, FetchError> {
        let mut attempts = 0;
        while attempts < MAX_ATTEMPTS {
            let url = format!("{}{}", self.rotator.current(), path);
            match self.http.get_json(&url).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    eprintln!("[Piped] {} failed: {}", self.rotator.current(), e);
                    self.rotator.advance();
                    attempts += 1;
                }
            }
        }
        Err(FetchError::AllMirrorsFailed)
    }
}

impl Default for PipedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContentSource for PipedSource {
    fn name(&self) -> &'static str {
        "piped"
    }

    async fn trending(&self, region: &str) -> Result<Vec<VideoRecord>, FetchError> {
        let value = self
            .fetch_rotating(&format!("/trending?region={}", region))
            .await?;

        let items: Vec<RawVideoItem> =
            serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(items.into_iter().map(RawVideoItem::into_record).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<VideoRecord>, FetchError> {
        let value = self
            .fetch_rotating(&format!(
                "/search?q={}&filter=all",
                urlencoding::encode(query)
            ))
            .await?;

        let envelope: RawSearchEnvelope =
            serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))?;

        // Search mixes streams with channels and playlists; only streams
        // become records.
        let records = envelope
            .items
            .into_iter()
            .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("stream"))
            .filter_map(|item| serde_json::from_value::<RawVideoItem>(item).ok())
            .map(RawVideoItem::into_record)
            .collect();

        Ok(records)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, FetchError> {
        let value = self
            .fetch_rotating(&format!(
                "/suggestions?query={}",
                urlencoding::encode(query)
            ))
            .await?;

        serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))
    }

    async fn resolve_stream(&self, id: &str) -> Result<String, FetchError> {
        let value = self.fetch_rotating(&format!("/streams/{}", id)).await?;

        let payload: RawStreamsPayload =
            serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))?;

        // HLS manifest preferred; first progressive stream otherwise
        if let Some(hls) = payload.hls {
            if !hls.is_empty() {
                return Ok(hls);
            }
        }
        payload
            .video_streams
            .into_iter()
            .find_map(|s| s.url.filter(|u| !u.is_empty()))
            .ok_or_else(|| FetchError::MissingStream(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TRENDING_BODY: &str = r#"[
        {
            "url": "/watch?v=dQw4w9WgXcQ",
            "title": "Classic",
            "uploaderName": "Rick",
            "views": 1500,
            "uploadedDate": "2 days ago",
            "duration": 212,
            "thumbnail": "https://img.example/1.jpg",
            "uploaderAvatar": "https://img.example/a1.jpg"
        },
        {
            "url": "/watch?v=live1234",
            "title": "24/7 Stream",
            "uploaderName": "Lofi",
            "views": 2300000,
            "duration": -1,
            "thumbnail": "https://img.example/2.jpg"
        }
    ]"#;

    fn source_for(server: &mockito::ServerGuard) -> PipedSource {
        PipedSource::with_parts(
            HttpAccessor::with_timeout(Duration::from_secs(2)),
            MirrorRotator::with_mirrors(vec![server.url()]),
        )
    }

    #[tokio::test]
    async fn test_trending_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/trending?region=US")
            .with_status(200)
            .with_body(TRENDING_BODY)
            .create_async()
            .await;

        let source = source_for(&server);
        let records = source.trending("US").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "dQw4w9WgXcQ");
        assert_eq!(records[0].views, "1.5K");
        assert_eq!(records[0].duration, "3:32");
        assert_eq!(records[0].date, "2 days ago");
        // Missing uploadedDate and negative duration
        assert_eq!(records[1].date, "Recently");
        assert_eq!(records[1].duration, "live");
        assert_eq!(records[1].views, "2.3M");
    }

    #[tokio::test]
    async fn test_search_keeps_only_streams() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "items": [
                {"type": "channel", "url": "/channel/UC123", "name": "Some Channel"},
                {"type": "stream", "url": "/watch?v=abc-_123", "title": "Hit",
                 "uploaderName": "U", "views": 10, "duration": 65,
                 "thumbnail": "t", "isShort": true}
            ]
        }"#;
        let _m = server
            .mock("GET", "/search?q=rust%20lang&filter=all")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let source = source_for(&server);
        let records = source.search("rust lang").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "abc-_123");
        assert_eq!(records[0].duration, "1:05");
        assert_eq!(records[0].is_short, Some(true));
    }

    #[tokio::test]
    async fn test_rotation_failover_and_sticky_cursor() {
        let mut bad = mockito::Server::new_async().await;
        let mut good = mockito::Server::new_async().await;
        let _bad = bad
            .mock("GET", "/suggestions?query=ca")
            .with_status(500)
            .create_async()
            .await;
        let _good = good
            .mock("GET", "/suggestions?query=ca")
            .with_status(200)
            .with_body(r#"["cat", "car"]"#)
            .expect(2)
            .create_async()
            .await;

        let rotator = MirrorRotator::with_mirrors(vec![bad.url(), good.url()]);
        let source = PipedSource::with_parts(
            HttpAccessor::with_timeout(Duration::from_secs(2)),
            rotator,
        );

        let first = source.suggestions("ca").await.unwrap();
        assert_eq!(first, vec!["cat".to_string(), "car".to_string()]);

        // Cursor stayed on the mirror that answered: the second call goes
        // straight to it without touching the failing one again.
        let second = source.suggestions("ca").await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_all_mirrors_failed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/trending?region=US")
            .with_status(503)
            .expect_at_least(2)
            .create_async()
            .await;

        // Both attempts land on the same (only) mirror and fail
        let source = source_for(&server);
        let err = source.trending("US").await.unwrap_err();
        assert!(matches!(err, FetchError::AllMirrorsFailed));
    }

    #[tokio::test]
    async fn test_stream_resolution_prefers_hls() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/streams/abc")
            .with_status(200)
            .with_body(r#"{"hls": "https://cdn.example/abc.m3u8", "videoStreams": [{"url": "https://cdn.example/abc.mp4"}]}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let url = source.resolve_stream("abc").await.unwrap();
        assert_eq!(url, "https://cdn.example/abc.m3u8");
    }

    #[tokio::test]
    async fn test_stream_resolution_falls_back_to_progressive() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/streams/abc")
            .with_status(200)
            .with_body(r#"{"videoStreams": [{"url": ""}, {"url": "https://cdn.example/abc.mp4"}]}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let url = source.resolve_stream("abc").await.unwrap();
        assert_eq!(url, "https://cdn.example/abc.mp4");
    }

    #[tokio::test]
    async fn test_stream_resolution_empty_payload() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/streams/abc")
            .with_status(200)
            .with_body(r#"{}"#)
            .create_async()
            .await;

        let source = source_for(&server);
        let err = source.resolve_stream("abc").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingStream(_)));
    }
}
