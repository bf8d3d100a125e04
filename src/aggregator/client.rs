// Aggregator - fallback policy over the live source and sample catalog
//
// Uniform policy: only YouTube has a live path; any error, timeout or
// empty answer from it silently degrades to samples. Trending and search
// never raise past this layer - callers observe degraded content, not
// failures. The origin tag on every result keeps the degradation visible.

use super::models::{FeedOrigin, FeedResult, Platform, PlatformSelection, StreamSource};
use super::piped::PipedSource;
use super::samples::{SampleCatalog, FALLBACK_STREAM_URL};
use super::traits::ContentSource;

pub struct Aggregator {
    live: Box<dyn ContentSource>,
    samples: SampleCatalog,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_source(Box::new(PipedSource::new()))
    }

    /// Inject a live source (tests use doubles here).
    pub fn with_source(live: Box<dyn ContentSource>) -> Self {
        Self {
            live,
            samples: SampleCatalog::new(),
        }
    }

    /// Trending feed for one platform filter, scoped by region code.
    pub async fn trending(&self, selection: PlatformSelection, region: &str) -> FeedResult {
        if selection.includes_live() {
            match self.live.trending(region).await {
                Ok(videos) if !videos.is_empty() => {
                    eprintln!(
                        "[Aggregator] ✓ {} trending videos via {}",
                        videos.len(),
                        self.live.name()
                    );
                    return FeedResult::live(videos);
                }
                Ok(_) => {
                    eprintln!(
                        "[Aggregator] {} returned an empty trending feed, using samples",
                        self.live.name()
                    );
                }
                Err(e) => {
                    eprintln!("[Aggregator] ✗ {} trending failed: {}", self.live.name(), e);
                }
            }
        }
        FeedResult::fallback(self.samples.trending(selection))
    }

    /// Free-text search. Mock platforms filter their sample set by
    /// substring (and may legitimately return nothing); a dead live path
    /// substitutes the whole sample set instead of an error.
    pub async fn search(&self, query: &str, selection: PlatformSelection) -> FeedResult {
        if selection.includes_live() {
            match self.live.search(query).await {
                Ok(videos) if !videos.is_empty() => {
                    eprintln!(
                        "[Aggregator] ✓ {} search hits via {}",
                        videos.len(),
                        self.live.name()
                    );
                    return FeedResult::live(videos);
                }
                Ok(_) => {
                    eprintln!("[Aggregator] Empty live search for {:?}, using samples", query);
                }
                Err(e) => {
                    eprintln!("[Aggregator] ✗ {} search failed: {}", self.live.name(), e);
                }
            }
            return FeedResult::fallback(self.samples.trending(selection));
        }
        FeedResult::fallback(self.samples.search(query, selection))
    }

    /// Autocomplete strings. Failures collapse to an empty list - the
    /// search box just shows no dropdown.
    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        match self.live.suggestions(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                eprintln!("[Aggregator] suggestions failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Resolve a playable URL. The player must always get something, so
    /// every failure path lands on the fixed sample media URL.
    pub async fn resolve_stream(&self, id: &str, platform: Platform) -> StreamSource {
        if platform == Platform::YouTube {
            match self.live.resolve_stream(id).await {
                Ok(url) => {
                    eprintln!("[Aggregator] ✓ Resolved stream for {}", id);
                    return StreamSource {
                        url,
                        origin: FeedOrigin::Live,
                    };
                }
                Err(e) => {
                    eprintln!("[Aggregator] ✗ Stream resolution for {} failed: {}", id, e);
                }
            }
        }
        StreamSource {
            url: FALLBACK_STREAM_URL.to_string(),
            origin: FeedOrigin::Fallback,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
