// Common data models for the aggregation layer

use serde::{Deserialize, Serialize};

/// Source platforms the app aggregates. Only YouTube has a live network
/// path (via Piped mirrors); the rest resolve against the sample catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    YouTube,
    TikTok,
    Rumble,
    Dailymotion,
    SoundCloud,
    BiliBili,
    PeerTube,
    Bandcamp,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Rumble => "Rumble",
            Platform::Dailymotion => "Dailymotion",
            Platform::SoundCloud => "SoundCloud",
            Platform::BiliBili => "BiliBili",
            Platform::PeerTube => "PeerTube",
            Platform::Bandcamp => "Bandcamp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "YouTube" => Some(Platform::YouTube),
            "TikTok" => Some(Platform::TikTok),
            "Rumble" => Some(Platform::Rumble),
            "Dailymotion" => Some(Platform::Dailymotion),
            "SoundCloud" => Some(Platform::SoundCloud),
            "BiliBili" => Some(Platform::BiliBili),
            "PeerTube" => Some(Platform::PeerTube),
            "Bandcamp" => Some(Platform::Bandcamp),
            _ => None,
        }
    }
}

/// Sidebar platform filter: everything, or one platform only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSelection {
    All,
    Only(Platform),
}

impl PlatformSelection {
    /// Parse the string the front-end sends ("All" or a platform name).
    /// Unknown names fall back to All rather than erroring — the filter is
    /// cosmetic, not a correctness boundary.
    pub fn parse(name: &str) -> Self {
        if name == "All" {
            return PlatformSelection::All;
        }
        match Platform::from_name(name) {
            Some(p) => PlatformSelection::Only(p),
            None => PlatformSelection::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformSelection::All => "All",
            PlatformSelection::Only(p) => p.as_str(),
        }
    }

    /// Whether the live (YouTube) path should be consulted for this filter.
    pub fn includes_live(&self) -> bool {
        matches!(
            self,
            PlatformSelection::All | PlatformSelection::Only(Platform::YouTube)
        )
    }
}

/// Canonical normalized representation of one piece of content,
/// regardless of source platform. All display fields are pre-formatted
/// strings by the time a record leaves the aggregation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Unique within the platform namespace; (id, platform) is unique
    /// within any result set.
    pub id: String,
    pub title: String,
    pub uploader: String,
    /// Formatted view count, e.g. "1.5K"
    pub views: String,
    /// Relative upload date, e.g. "2 days ago"
    pub date: String,
    /// Formatted duration ("12:45"), or the literal "live"
    pub duration: String,
    pub thumbnail: String,
    pub platform: Platform,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Resolved playback URL, present once the player asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_short: Option<bool>,
}

/// Where a result actually came from. Lets callers and tests tell real
/// content from substituted sample content without sniffing data shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrigin {
    /// Fetched from a live mirror
    Live,
    /// Served from the static sample catalog
    Fallback,
}

/// A feed answer: the records plus their origin tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResult {
    pub videos: Vec<VideoRecord>,
    pub origin: FeedOrigin,
}

impl FeedResult {
    pub fn live(videos: Vec<VideoRecord>) -> Self {
        Self {
            videos,
            origin: FeedOrigin::Live,
        }
    }

    pub fn fallback(videos: Vec<VideoRecord>) -> Self {
        Self {
            videos,
            origin: FeedOrigin::Fallback,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// A resolved playback URL plus its origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSource {
    pub url: String,
    pub origin: FeedOrigin,
}
