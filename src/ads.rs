// Ad frequency management
//
// Counts video opens and asks for an interstitial every third one.
// Rendering (and the decision to actually show anything) belongs to the
// front-end; this is only the pacing logic and the static config.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

/// Every Nth non-pro play triggers an interstitial
const INTERSTITIAL_THRESHOLD: u32 = 3;

/// Static ad wiring the front-end reads. Direct links are the usual
/// route in hybrid apps; the native IDs are placeholders for plugin
/// integration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdConfig {
    pub adsterra_url: &'static str,
    pub moneytag_url: &'static str,
    pub admob_banner_id: &'static str,
    pub unity_game_id: &'static str,
    pub show_banners: bool,
    pub open_in_new_tab: bool,
    pub networks: Vec<&'static str>,
}

impl AdConfig {
    pub fn current() -> Self {
        Self {
            adsterra_url: "https://adsterra.com/",
            moneytag_url: "",
            admob_banner_id: "ca-app-pub-0000000000000000/0000000000",
            unity_game_id: "0000000",
            show_banners: true,
            open_in_new_tab: true,
            networks: vec!["AdMob", "Unity Ads", "Adsterra", "Advertica", "Moneytag"],
        }
    }
}

/// Process-wide play counter. Pro users neither see interstitials nor
/// advance the counter.
pub struct AdManager {
    play_count: AtomicU32,
}

impl AdManager {
    pub fn new() -> Self {
        Self {
            play_count: AtomicU32::new(0),
        }
    }

    /// Count one video open; true when an interstitial is due.
    pub fn check_and_increment(&self, pro: bool) -> bool {
        if pro {
            return false;
        }
        let count = self.play_count.fetch_add(1, Ordering::SeqCst) + 1;
        eprintln!("[Ads] Video play count {}", count);
        count % INTERSTITIAL_THRESHOLD == 0
    }
}

impl Default for AdManager {
    fn default() -> Self {
        Self::new()
    }
}

// --- Commands ---

#[tauri::command]
pub fn should_show_interstitial(state: tauri::State<'_, crate::AppState>) -> Result<bool, String> {
    let pro = state.data.lock().unwrap().pro;
    Ok(state.ads.check_and_increment(pro))
}

#[tauri::command]
pub fn get_ad_config() -> Result<AdConfig, String> {
    Ok(AdConfig::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_third_play_triggers() {
        let ads = AdManager::new();
        let hits: Vec<bool> = (0..9).map(|_| ads.check_and_increment(false)).collect();
        assert_eq!(
            hits,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_pro_never_sees_interstitials() {
        let ads = AdManager::new();
        for _ in 0..10 {
            assert!(!ads.check_and_increment(true));
        }
        // Pro plays did not advance the counter either
        assert!(!ads.check_and_increment(false));
        assert!(!ads.check_and_increment(false));
        assert!(ads.check_and_increment(false));
    }

    #[test]
    fn test_config_has_banner_networks() {
        let config = AdConfig::current();
        assert!(config.show_banners);
        assert!(config.networks.contains(&"Adsterra"));
    }
}
