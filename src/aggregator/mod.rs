// Aggregation module - upstream fetching, mirror rotation, fallback policy
//
// Layering, leaf-first:
// - http: one request, fixed timeout, no retry
// - rotation: mirror list + cursor, advance on failure
// - piped: the only live source (request building + payload mapping)
// - samples: static catalog the mock platforms resolve against
// - client: the four public operations with silent degradation to samples

pub mod client;
pub mod errors;
pub mod format;
pub mod http;
pub mod models;
pub mod piped;
pub mod rotation;
pub mod samples;
pub mod traits;

pub use client::Aggregator;
pub use errors::FetchError;
pub use models::{FeedOrigin, FeedResult, Platform, PlatformSelection, StreamSource, VideoRecord};
pub use samples::{SampleCatalog, FALLBACK_STREAM_URL};
pub use traits::ContentSource;
