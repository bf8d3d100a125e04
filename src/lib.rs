mod ads;
mod aggregator;
mod feed;
mod library;
mod live_scores;

use std::sync::Mutex;

use ads::AdManager;
use aggregator::Aggregator;
use feed::FeedOrchestrator;
use library::store::LocalStore;
use library::AppData;
use live_scores::LiveScoreFeed;

/// Application-wide shared state behind every command
pub struct AppState {
    pub feed: FeedOrchestrator,
    pub data: Mutex<AppData>,
    pub store: LocalStore,
    pub ads: AdManager,
    pub scores: LiveScoreFeed,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Load persisted state before the window shows; a corrupt namespace
    // is wiped here and the app starts from defaults
    let store = LocalStore::open_default();
    let data = AppData::load_or_recover(&store);

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState {
            feed: FeedOrchestrator::new(Aggregator::new()),
            data: Mutex::new(data),
            store,
            ads: AdManager::new(),
            scores: LiveScoreFeed::new(),
        })
        .invoke_handler(tauri::generate_handler![
            feed::open_view,
            feed::refresh_feed,
            feed::get_suggestions,
            feed::resolve_stream,
            feed::set_active_platform,
            library::get_history,
            library::record_watch,
            library::clear_history,
            library::get_bookmarks,
            library::toggle_bookmark,
            library::get_settings,
            library::update_settings,
            library::get_logins,
            library::register_login,
            library::subscription_status,
            library::activate_subscription,
            ads::should_show_interstitial,
            ads::get_ad_config,
            live_scores::poll_live_score,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
