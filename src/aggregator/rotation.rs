// Mirror rotation
//
// Mirrors are community-run and individually unreliable; rotating on
// failure trades latency for availability without health-checking
// infrastructure. The cursor is sticky to the last mirror that worked —
// a mirror that just answered is likely to keep answering.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Public Piped instances, tried in order from the cursor
const PIPED_INSTANCES: [&str; 3] = [
    "https://pipedapi.kavin.rocks",
    "https://api.piped.vic.click",
    "https://piped-api.garudalinux.org",
];

/// How many mirrors one request may try before giving up
pub const MAX_ATTEMPTS: usize = 2;

/// Ordered mirror list plus a shared cursor. Owned and injectable — the
/// client holds one instance, tests construct their own with local URLs.
/// The cursor is atomic because tauri commands run on a threaded runtime.
/// Never persisted; every process starts at the first mirror.
pub struct MirrorRotator {
    mirrors: Vec<String>,
    cursor: AtomicUsize,
}

impl MirrorRotator {
    pub fn new() -> Self {
        Self::with_mirrors(PIPED_INSTANCES.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_mirrors(mirrors: Vec<String>) -> Self {
        assert!(!mirrors.is_empty(), "mirror list must not be empty");
        Self {
            mirrors,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Base URL the next attempt should hit.
    pub fn current(&self) -> &str {
        &self.mirrors[self.cursor.load(Ordering::Relaxed) % self.mirrors.len()]
    }

    /// Move to the next mirror (wrapping). Called only on failure.
    pub fn advance(&self) {
        let next = (self.cursor.load(Ordering::Relaxed) + 1) % self.mirrors.len();
        self.cursor.store(next, Ordering::Relaxed);
        eprintln!("[Rotation] Advancing to mirror {}", self.current());
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    #[cfg(test)]
    pub fn cursor_position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed) % self.mirrors.len()
    }
}

impl Default for MirrorRotator {
    fn default() -> Self {
        Self::new()
    }
}
