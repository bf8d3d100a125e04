// Feed orchestration - view state machine and fetch sequencing
//
// One fetch budget lives here (the transport timeout below it can only
// fire earlier). A timed-out future is dropped, which cancels it, and a
// generation counter discards anything that still manages to finish
// late, so a stale response can never overwrite a fresher feed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tauri::Emitter;
use tokio::time::timeout;

use crate::aggregator::{
    Aggregator, FeedOrigin, FeedResult, Platform, PlatformSelection, SampleCatalog, StreamSource,
    VideoRecord,
};

/// Total time one view fetch may take before samples go up instead
const FETCH_BUDGET: Duration = Duration::from_secs(5);

/// The LiveSports view is a canned aggregate search
const LIVE_SPORTS_QUERY: &str = "Live Cricket";

/// The views the app can show. Wire values match what the front-end
/// router uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Home,
    Trending,
    Subscriptions,
    Library,
    Search,
    LiveSports,
    SettingsPrivacy,
}

impl ViewState {
    /// Privacy settings is the one view that renders purely local data.
    fn is_data_bearing(&self) -> bool {
        !matches!(self, ViewState::SettingsPrivacy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    /// Videos are ready to render
    Ready,
    /// Both the live path and the sample substitution came back empty -
    /// the "connection issue" panel with a manual retry
    Empty,
    /// View carries no feed; nothing was fetched
    Skipped,
    /// A newer fetch superseded this one; discard the snapshot
    Stale,
}

/// What a view fetch produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub view: ViewState,
    pub status: FeedStatus,
    pub origin: FeedOrigin,
    pub videos: Vec<VideoRecord>,
    /// Whether the UI had no cached content to show while this fetch ran
    pub show_skeleton: bool,
}

/// Emitted when a fetch starts so the front-end can decide about the
/// skeleton before the result lands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadingNotice {
    view: ViewState,
    show_skeleton: bool,
}

struct FeedCache {
    view: ViewState,
    query: String,
    videos: Vec<VideoRecord>,
    origin: FeedOrigin,
}

pub struct FeedOrchestrator {
    aggregator: Aggregator,
    samples: SampleCatalog,
    cache: Mutex<FeedCache>,
    generation: AtomicU64,
    budget: Duration,
}

impl FeedOrchestrator {
    pub fn new(aggregator: Aggregator) -> Self {
        Self::with_budget(aggregator, FETCH_BUDGET)
    }

    /// Custom budget for tests.
    pub fn with_budget(aggregator: Aggregator, budget: Duration) -> Self {
        Self {
            aggregator,
            samples: SampleCatalog::new(),
            cache: Mutex::new(FeedCache {
                view: ViewState::Home,
                query: String::new(),
                videos: Vec::new(),
                origin: FeedOrigin::Fallback,
            }),
            generation: AtomicU64::new(0),
            budget,
        }
    }

    /// No skeleton flash when content from a previous view is already up.
    pub fn show_skeleton(&self) -> bool {
        self.cache.lock().unwrap().videos.is_empty()
    }

    /// Enter a view and produce its feed. Data-bearing views fetch
    /// (scoped per view), everything degrades to samples inside the
    /// budget, and stale results are discarded instead of committed.
    pub async fn open_view(
        &self,
        view: ViewState,
        selection: PlatformSelection,
        region: &str,
        query: &str,
    ) -> FeedSnapshot {
        let show_skeleton = self.show_skeleton();

        if !view.is_data_bearing() {
            return FeedSnapshot {
                view,
                status: FeedStatus::Skipped,
                origin: FeedOrigin::Fallback,
                videos: Vec::new(),
                show_skeleton: false,
            };
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetch = async {
            match view {
                ViewState::Search => self.aggregator.search(query, selection).await,
                ViewState::LiveSports => {
                    self.aggregator
                        .search(LIVE_SPORTS_QUERY, PlatformSelection::All)
                        .await
                }
                _ => self.aggregator.trending(selection, region).await,
            }
        };

        let result = match timeout(self.budget, fetch).await {
            Ok(result) => result,
            Err(_) => {
                eprintln!("[Feed] Fetch budget exhausted for {:?}, using samples", view);
                FeedResult::fallback(self.samples.trending(selection))
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            eprintln!("[Feed] Discarding stale result for {:?}", view);
            return FeedSnapshot {
                view,
                status: FeedStatus::Stale,
                origin: result.origin,
                videos: Vec::new(),
                show_skeleton,
            };
        }

        let status = if result.is_empty() {
            FeedStatus::Empty
        } else {
            FeedStatus::Ready
        };

        let mut cache = self.cache.lock().unwrap();
        cache.view = view;
        cache.query = query.to_string();
        cache.videos = result.videos.clone();
        cache.origin = result.origin;

        FeedSnapshot {
            view,
            status,
            origin: result.origin,
            videos: result.videos,
            show_skeleton,
        }
    }

    /// Re-run the cached view's fetch (the manual retry action).
    pub async fn refresh(&self, selection: PlatformSelection, region: &str) -> FeedSnapshot {
        let (view, query) = {
            let cache = self.cache.lock().unwrap();
            (cache.view, cache.query.clone())
        };
        self.open_view(view, selection, region, &query).await
    }

    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        self.aggregator.suggestions(query).await
    }

    pub async fn resolve_stream(&self, id: &str, platform: Platform) -> StreamSource {
        self.aggregator.resolve_stream(id, platform).await
    }
}

// --- Commands ---

fn feed_params(state: &tauri::State<'_, crate::AppState>) -> (PlatformSelection, String) {
    let data = state.data.lock().unwrap();
    (
        PlatformSelection::parse(&data.active_platform),
        data.settings.country.clone(),
    )
}

#[tauri::command]
pub async fn open_view(
    view: ViewState,
    query: Option<String>,
    app_handle: tauri::AppHandle,
    state: tauri::State<'_, crate::AppState>,
) -> Result<FeedSnapshot, String> {
    let (selection, region) = feed_params(&state);

    // Fire-and-forget: the front-end may not be listening yet
    let _ = app_handle.emit(
        "feed-loading",
        LoadingNotice {
            view,
            show_skeleton: state.feed.show_skeleton(),
        },
    );

    Ok(state
        .feed
        .open_view(view, selection, &region, query.as_deref().unwrap_or(""))
        .await)
}

#[tauri::command]
pub async fn refresh_feed(
    state: tauri::State<'_, crate::AppState>,
) -> Result<FeedSnapshot, String> {
    let (selection, region) = feed_params(&state);
    Ok(state.feed.refresh(selection, &region).await)
}

#[tauri::command]
pub async fn get_suggestions(
    query: String,
    state: tauri::State<'_, crate::AppState>,
) -> Result<Vec<String>, String> {
    Ok(state.feed.suggestions(&query).await)
}

#[tauri::command]
pub async fn resolve_stream(
    id: String,
    platform: String,
    state: tauri::State<'_, crate::AppState>,
) -> Result<StreamSource, String> {
    let platform = Platform::from_name(&platform)
        .ok_or_else(|| format!("Unknown platform: {}", platform))?;
    Ok(state.feed.resolve_stream(&id, platform).await)
}

#[tauri::command]
pub fn set_active_platform(
    platform: String,
    state: tauri::State<'_, crate::AppState>,
) -> Result<(), String> {
    let mut data = state.data.lock().unwrap();
    data.active_platform = platform;
    if let Err(e) = state
        .store
        .save(crate::library::store::KEY_ACTIVE_PLATFORM, &data.active_platform)
    {
        eprintln!("[Feed] Failed to persist active platform: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{ContentSource, FetchError};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn video(id: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("Video {}", id),
            uploader: "Channel".to_string(),
            views: "10".to_string(),
            date: "Recently".to_string(),
            duration: "1:00".to_string(),
            thumbnail: String::new(),
            platform: Platform::YouTube,
            avatar: String::new(),
            country: None,
            stream_url: None,
            is_short: None,
        }
    }

    /// Double that answers after a configurable delay.
    struct SlowSource {
        delay: Duration,
        videos: Vec<VideoRecord>,
    }

    #[async_trait]
    impl ContentSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }
        async fn trending(&self, _region: &str) -> Result<Vec<VideoRecord>, FetchError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.videos.clone())
        }
        async fn search(&self, _query: &str) -> Result<Vec<VideoRecord>, FetchError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.videos.clone())
        }
        async fn suggestions(&self, _query: &str) -> Result<Vec<String>, FetchError> {
            Ok(Vec::new())
        }
        async fn resolve_stream(&self, _id: &str) -> Result<String, FetchError> {
            Err(FetchError::AllMirrorsFailed)
        }
    }

    fn orchestrator_with(delay: Duration, budget: Duration, videos: Vec<VideoRecord>) -> FeedOrchestrator {
        FeedOrchestrator::with_budget(
            Aggregator::with_source(Box::new(SlowSource { delay, videos })),
            budget,
        )
    }

    #[tokio::test]
    async fn test_home_view_serves_live_feed() {
        let orch = orchestrator_with(
            Duration::from_millis(0),
            Duration::from_secs(1),
            vec![video("a")],
        );

        let snapshot = orch
            .open_view(ViewState::Home, PlatformSelection::All, "US", "")
            .await;

        assert_eq!(snapshot.status, FeedStatus::Ready);
        assert_eq!(snapshot.origin, FeedOrigin::Live);
        assert_eq!(snapshot.videos.len(), 1);
        // First fetch had nothing cached
        assert!(snapshot.show_skeleton);
    }

    #[tokio::test]
    async fn test_skeleton_suppressed_once_content_cached() {
        let orch = orchestrator_with(
            Duration::from_millis(0),
            Duration::from_secs(1),
            vec![video("a")],
        );

        let first = orch
            .open_view(ViewState::Home, PlatformSelection::All, "US", "")
            .await;
        assert!(first.show_skeleton);

        let second = orch
            .open_view(ViewState::Trending, PlatformSelection::All, "US", "")
            .await;
        assert!(!second.show_skeleton);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_serves_samples() {
        let orch = orchestrator_with(
            Duration::from_millis(200),
            Duration::from_millis(20),
            vec![video("a")],
        );

        let snapshot = orch
            .open_view(ViewState::Home, PlatformSelection::All, "US", "")
            .await;

        assert_eq!(snapshot.status, FeedStatus::Ready);
        assert_eq!(snapshot.origin, FeedOrigin::Fallback);
        assert!(!snapshot.videos.is_empty());
    }

    #[tokio::test]
    async fn test_settings_view_skips_fetch() {
        let orch = orchestrator_with(
            Duration::from_millis(0),
            Duration::from_secs(1),
            vec![video("a")],
        );

        let snapshot = orch
            .open_view(ViewState::SettingsPrivacy, PlatformSelection::All, "US", "")
            .await;

        assert_eq!(snapshot.status, FeedStatus::Skipped);
        assert!(snapshot.videos.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_on_mock_platform_reports_empty() {
        let orch = orchestrator_with(
            Duration::from_millis(0),
            Duration::from_secs(1),
            Vec::new(),
        );

        let snapshot = orch
            .open_view(
                ViewState::Search,
                PlatformSelection::Only(Platform::Rumble),
                "US",
                "zzz-no-such-title",
            )
            .await;

        assert_eq!(snapshot.status, FeedStatus::Empty);
        assert!(snapshot.videos.is_empty());
    }

    #[tokio::test]
    async fn test_stale_fetch_discarded_by_newer_one() {
        let orch = Arc::new(orchestrator_with(
            Duration::from_millis(80),
            Duration::from_secs(1),
            vec![video("slow")],
        ));

        let first = {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move {
                orch.open_view(ViewState::Home, PlatformSelection::All, "US", "")
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = orch
            .open_view(ViewState::Trending, PlatformSelection::All, "US", "")
            .await;
        let first = first.await.unwrap();

        // Both fetches took ~80ms; the first finished first but was
        // already superseded when it did.
        assert_eq!(first.status, FeedStatus::Stale);
        assert!(first.videos.is_empty());
        assert_eq!(second.status, FeedStatus::Ready);
    }

    #[tokio::test]
    async fn test_refresh_replays_cached_view() {
        let orch = orchestrator_with(
            Duration::from_millis(0),
            Duration::from_secs(1),
            vec![video("hit")],
        );

        orch.open_view(ViewState::Search, PlatformSelection::All, "US", "cats")
            .await;
        let replay = orch.refresh(PlatformSelection::All, "US").await;

        assert_eq!(replay.view, ViewState::Search);
        assert_eq!(replay.status, FeedStatus::Ready);
    }

    #[test]
    fn test_view_wire_values() {
        assert_eq!(
            serde_json::to_string(&ViewState::LiveSports).unwrap(),
            "\"LIVE_SPORTS\""
        );
        assert_eq!(
            serde_json::to_string(&ViewState::SettingsPrivacy).unwrap(),
            "\"SETTINGS_PRIVACY\""
        );
    }
}
