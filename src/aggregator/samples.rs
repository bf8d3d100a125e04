// Static sample catalog
//
// Hardcoded content substituted whenever live data is unavailable, and
// the only "data source" the mock platforms have. The feed must never
// render empty because a community mirror is down.

use lazy_static::lazy_static;

use super::models::{Platform, PlatformSelection, VideoRecord};

/// Always-playable sample media, used when stream resolution fails
pub const FALLBACK_STREAM_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

fn sample(
    id: &str,
    title: &str,
    uploader: &str,
    views: &str,
    date: &str,
    duration: &str,
    platform: Platform,
    country: Option<&str>,
) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: title.to_string(),
        uploader: uploader.to_string(),
        views: views.to_string(),
        date: date.to_string(),
        duration: duration.to_string(),
        thumbnail: format!("https://picsum.photos/seed/{}/640/360", id),
        platform,
        avatar: format!("https://i.pravatar.cc/150?u={}", uploader.replace(' ', "")),
        country: country.map(|c| c.to_string()),
        stream_url: None,
        is_short: None,
    }
}

lazy_static! {
    static ref GENERAL_VIDEOS: Vec<VideoRecord> = vec![
        sample("yt-001", "Street Food Tour: Old Dhaka After Dark", "Flavors of Bengal",
               "2.3M", "3 days ago", "14:27", Platform::YouTube, Some("BD")),
        sample("yt-002", "Building a Tiny House in 30 Days", "Offgrid Workshop",
               "891K", "1 week ago", "22:10", Platform::YouTube, None),
        sample("yt-003", "T20 World Cup: Top 10 Catches", "Cricket Central",
               "4.1M", "2 days ago", "8:45", Platform::YouTube, Some("IN")),
        sample("yt-004", "Lo-fi Beats for Late Night Study", "Midnight Radio",
               "12M", "1 month ago", "live", Platform::YouTube, None),
        sample("yt-005", "I Tried Every Budget Phone of 2025", "TechScope",
               "1.7M", "5 days ago", "16:02", Platform::YouTube, None),
        sample("yt-006", "Monsoon Train Journey: Chittagong to Sylhet", "Rail Diaries",
               "356K", "2 weeks ago", "31:54", Platform::YouTube, Some("BD")),
    ];

    static ref TIKTOK_VIDEOS: Vec<VideoRecord> = vec![
        sample("tt-101", "POV: your cat discovers the fish market", "whisker.tales",
               "8.9M", "1 day ago", "0:21", Platform::TikTok, None),
        sample("tt-102", "60-second biryani hack", "quickplates",
               "3.2M", "4 days ago", "0:58", Platform::TikTok, None),
        sample("tt-103", "Dhaka rooftop sunset timelapse", "cityframes",
               "640K", "2 days ago", "0:15", Platform::TikTok, Some("BD")),
        sample("tt-104", "Cricket trick shots pt. 7", "backyardleague",
               "5.5M", "6 hours ago", "0:34", Platform::TikTok, None),
    ];

    static ref RUMBLE_VIDEOS: Vec<VideoRecord> = vec![
        sample("rb-201", "Restoring a 1972 Royal Enfield", "Garage Classics",
               "127K", "1 week ago", "24:18", Platform::Rumble, None),
        sample("rb-202", "Deep Sea Fishing: Bay of Bengal", "Saltwater Stories",
               "88K", "3 days ago", "18:40", Platform::Rumble, Some("BD")),
        sample("rb-203", "Homestead Morning Routine", "Prairie Life",
               "210K", "2 weeks ago", "12:05", Platform::Rumble, None),
    ];

    static ref PEERTUBE_VIDEOS: Vec<VideoRecord> = vec![
        sample("pt-301", "Intro to Self-Hosting Your Own Video Server", "FediTech",
               "45K", "1 month ago", "19:33", Platform::PeerTube, None),
        sample("pt-302", "Community Garden Documentary", "Open Lens Collective",
               "12K", "2 weeks ago", "27:11", Platform::PeerTube, None),
        sample("pt-303", "Linux on a 10-Year-Old Laptop", "Terminal Window",
               "31K", "5 days ago", "15:48", Platform::PeerTube, None),
    ];
}

/// Lookup into the static per-platform sample sets.
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Sample trending feed for a platform filter. Platforms without a
    /// dedicated set share the general one.
    pub fn trending(&self, selection: PlatformSelection) -> Vec<VideoRecord> {
        match selection {
            PlatformSelection::Only(Platform::TikTok) => TIKTOK_VIDEOS.clone(),
            PlatformSelection::Only(Platform::Rumble) => RUMBLE_VIDEOS.clone(),
            PlatformSelection::Only(Platform::PeerTube) => PEERTUBE_VIDEOS.clone(),
            _ => GENERAL_VIDEOS.clone(),
        }
    }

    /// Case-insensitive substring match on titles. May legitimately be
    /// empty — a no-match search is not an outage.
    pub fn search(&self, query: &str, selection: PlatformSelection) -> Vec<VideoRecord> {
        let needle = query.to_lowercase();
        self.trending(selection)
            .into_iter()
            .filter(|v| v.title.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self::new()
    }
}
