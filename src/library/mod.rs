// Library state - settings, watch history, bookmarks, logins, subscription
//
// AppData is plain data with pure operations; the commands at the bottom
// wire every mutation to its persistence side effect. Persistence is
// best-effort: a failed write is logged, never surfaced as fatal.

pub mod store;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::aggregator::VideoRecord;
use store::{
    LocalStore, KEY_ACTIVE_PLATFORM, KEY_BOOKMARKS, KEY_HISTORY, KEY_LOGINS, KEY_PRO_EXPIRY,
    KEY_SETTINGS,
};

/// Watch history never grows past this many entries
pub const HISTORY_CAP: usize = 50;

/// One activation buys this many days of pro
const PRO_TERM_DAYS: i64 = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub country: String,
    pub language: String,
    pub incognito: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            language: "en".to_string(),
            incognito: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub pro: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

/// Everything the app persists, plus the pro flag derived at load time.
#[derive(Debug, Clone)]
pub struct AppData {
    pub active_platform: String,
    pub history: Vec<VideoRecord>,
    pub bookmarks: Vec<VideoRecord>,
    pub settings: UserSettings,
    pub logins: Vec<String>,
    pub pro_expiry: Option<String>,
    pub pro: bool,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            active_platform: "All".to_string(),
            history: Vec::new(),
            bookmarks: Vec::new(),
            settings: UserSettings::default(),
            logins: Vec::new(),
            pro_expiry: None,
            pro: false,
        }
    }
}

impl AppData {
    /// Bulk startup load. A single corrupt key means the namespace is
    /// untrustworthy: wipe it all and restart from defaults. Absent keys
    /// are just defaults - first launch looks exactly like this.
    pub fn load_or_recover(store: &LocalStore) -> Self {
        let loaded = Self::try_load_all(store);
        match loaded {
            Ok(data) => data,
            Err(e) => {
                eprintln!("[Library] Storage corrupted ({}), clearing...", e);
                store.wipe();
                Self::default()
            }
        }
    }

    fn try_load_all(store: &LocalStore) -> Result<Self, store::StoreError> {
        let defaults = Self::default();
        let active_platform = store
            .try_load::<String>(KEY_ACTIVE_PLATFORM)?
            .unwrap_or(defaults.active_platform);
        let history = store
            .try_load::<Vec<VideoRecord>>(KEY_HISTORY)?
            .unwrap_or_default();
        let bookmarks = store
            .try_load::<Vec<VideoRecord>>(KEY_BOOKMARKS)?
            .unwrap_or_default();
        let settings = store
            .try_load::<UserSettings>(KEY_SETTINGS)?
            .unwrap_or_default();
        let logins = store
            .try_load::<Vec<String>>(KEY_LOGINS)?
            .unwrap_or_default();
        let pro_expiry = store.try_load::<String>(KEY_PRO_EXPIRY)?;
        let pro = pro_expiry
            .as_deref()
            .map(|e| expiry_is_active(e, OffsetDateTime::now_utc()))
            .unwrap_or(false);

        Ok(Self {
            active_platform,
            history,
            bookmarks,
            settings,
            logins,
            pro_expiry,
            pro,
        })
    }

    /// Record a watched video at the front of history. Re-watching moves
    /// the entry instead of duplicating it. No-op under incognito.
    /// Returns whether anything was recorded.
    pub fn record_watch(&mut self, video: VideoRecord) -> bool {
        if self.settings.incognito {
            return false;
        }
        self.history.retain(|v| v.id != video.id);
        self.history.insert(0, video);
        self.history.truncate(HISTORY_CAP);
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Add if absent, remove if present. Returns whether the video is
    /// bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, video: VideoRecord) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|v| v.id != video.id);
        if self.bookmarks.len() < before {
            return false;
        }
        self.bookmarks.insert(0, video);
        true
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|v| v.id == id)
    }

    /// Remember a platform the user logged into. Returns false if it was
    /// already on the list.
    pub fn register_login(&mut self, platform: String) -> bool {
        if self.logins.contains(&platform) {
            return false;
        }
        self.logins.push(platform);
        true
    }

    /// Start (or extend from now) a pro term.
    pub fn activate_pro(&mut self, now: OffsetDateTime) {
        let expiry = now + Duration::days(PRO_TERM_DAYS);
        match expiry.format(&Rfc3339) {
            Ok(stamp) => {
                self.pro_expiry = Some(stamp);
                self.pro = true;
            }
            Err(e) => eprintln!("[Library] Failed to format expiry: {}", e),
        }
    }

    pub fn subscription_status(&self) -> SubscriptionStatus {
        SubscriptionStatus {
            pro: self.pro,
            expiry: self.pro_expiry.clone(),
        }
    }
}

/// A persisted expiry keeps pro active while it lies in the future.
/// Unparseable stamps count as expired.
fn expiry_is_active(expiry: &str, now: OffsetDateTime) -> bool {
    match OffsetDateTime::parse(expiry, &Rfc3339) {
        Ok(when) => when > now,
        Err(e) => {
            eprintln!("[Library] Unreadable pro expiry {:?}: {}", expiry, e);
            false
        }
    }
}

/// Best-effort persistence: log and continue on failure.
fn persist<T: Serialize>(store: &LocalStore, key: &str, value: &T) {
    if let Err(e) = store.save(key, value) {
        eprintln!("[Library] Failed to persist {}: {}", key, e);
    }
}

// --- Commands ---

#[tauri::command]
pub fn get_history(state: tauri::State<'_, crate::AppState>) -> Result<Vec<VideoRecord>, String> {
    Ok(state.data.lock().unwrap().history.clone())
}

#[tauri::command]
pub fn record_watch(
    video: VideoRecord,
    state: tauri::State<'_, crate::AppState>,
) -> Result<bool, String> {
    let mut data = state.data.lock().unwrap();
    let recorded = data.record_watch(video);
    if recorded {
        persist(&state.store, KEY_HISTORY, &data.history);
    }
    Ok(recorded)
}

#[tauri::command]
pub fn clear_history(state: tauri::State<'_, crate::AppState>) -> Result<(), String> {
    let mut data = state.data.lock().unwrap();
    data.clear_history();
    state.store.remove(KEY_HISTORY);
    Ok(())
}

#[tauri::command]
pub fn get_bookmarks(state: tauri::State<'_, crate::AppState>) -> Result<Vec<VideoRecord>, String> {
    Ok(state.data.lock().unwrap().bookmarks.clone())
}

#[tauri::command]
pub fn toggle_bookmark(
    video: VideoRecord,
    state: tauri::State<'_, crate::AppState>,
) -> Result<bool, String> {
    let mut data = state.data.lock().unwrap();
    let bookmarked = data.toggle_bookmark(video);
    persist(&state.store, KEY_BOOKMARKS, &data.bookmarks);
    Ok(bookmarked)
}

#[tauri::command]
pub fn get_settings(state: tauri::State<'_, crate::AppState>) -> Result<UserSettings, String> {
    Ok(state.data.lock().unwrap().settings.clone())
}

#[tauri::command]
pub fn update_settings(
    settings: UserSettings,
    state: tauri::State<'_, crate::AppState>,
) -> Result<(), String> {
    let mut data = state.data.lock().unwrap();
    data.settings = settings;
    persist(&state.store, KEY_SETTINGS, &data.settings);
    Ok(())
}

#[tauri::command]
pub fn get_logins(state: tauri::State<'_, crate::AppState>) -> Result<Vec<String>, String> {
    Ok(state.data.lock().unwrap().logins.clone())
}

#[tauri::command]
pub fn register_login(
    platform: String,
    state: tauri::State<'_, crate::AppState>,
) -> Result<Vec<String>, String> {
    let mut data = state.data.lock().unwrap();
    if data.register_login(platform) {
        persist(&state.store, KEY_LOGINS, &data.logins);
    }
    Ok(data.logins.clone())
}

#[tauri::command]
pub fn subscription_status(
    state: tauri::State<'_, crate::AppState>,
) -> Result<SubscriptionStatus, String> {
    Ok(state.data.lock().unwrap().subscription_status())
}

#[tauri::command]
pub fn activate_subscription(
    state: tauri::State<'_, crate::AppState>,
) -> Result<SubscriptionStatus, String> {
    let mut data = state.data.lock().unwrap();
    data.activate_pro(OffsetDateTime::now_utc());
    if let Some(expiry) = &data.pro_expiry {
        persist(&state.store, KEY_PRO_EXPIRY, expiry);
    }
    Ok(data.subscription_status())
}
