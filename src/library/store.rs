// Local persistence store
//
// One JSON file per key under the app's data directory. No transactions
// across keys: every key is independently defaulted on load, so a crash
// between two related writes costs at most one stale value.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Matches the identifier in tauri.conf.json
const APP_IDENTIFIER: &str = "com.streamx.app";

// Persisted keys
pub const KEY_ACTIVE_PLATFORM: &str = "active_platform";
pub const KEY_HISTORY: &str = "history";
pub const KEY_BOOKMARKS: &str = "bookmarks";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_LOGINS: &str = "logins";
pub const KEY_PRO_EXPIRY: &str = "pro_expiry";

#[derive(Debug, Clone)]
pub enum StoreError {
    /// Value exists but is not parseable JSON of the expected shape
    Corrupt(String),

    /// Filesystem trouble reading or writing
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupt(msg) => write!(f, "Stored value corrupt: {}", msg),
            Self::Io(msg) => write!(f, "Storage I/O error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// JSON key-value store rooted in one directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Store under the platform data directory. Falls back to the temp
    /// dir on exotic hosts rather than refusing to start.
    pub fn open_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::open(base.join(APP_IDENTIFIER))
    }

    pub fn open(root: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&root) {
            eprintln!("[Store] Failed to create {}: {}", root.display(), e);
        }
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Absent key is Ok(None); unreadable or unparseable values are
    /// errors the bulk loader can distinguish.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        let value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(format!("{}: {}", key, e)))?;
        Ok(Some(value))
    }

    /// Load with a fallback: absence and corruption both yield the
    /// fallback, never an error to the caller.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                eprintln!("[Store] {} unusable ({}), using default", key, e);
                fallback
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(self.path_for(key), raw).map_err(|e| StoreError::Io(e.to_string()))
    }

    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("[Store] Failed to remove {}: {}", key, e);
            }
        }
    }

    /// Blunt recovery: drop every value in the namespace. A clean
    /// restart beats partial, possibly-inconsistent state.
    pub fn wipe(&self) {
        eprintln!("[Store] Wiping storage namespace at {}", self.root.display());
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("[Store] Wipe failed to list {}: {}", self.root.display(), e);
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Err(e) = fs::remove_file(&path) {
                    eprintln!("[Store] Wipe failed on {}: {}", path.display(), e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, store) = temp_store();
        store.save(KEY_LOGINS, &vec!["YouTube".to_string()]).unwrap();

        let logins: Vec<String> = store.load(KEY_LOGINS, Vec::new());
        assert_eq!(logins, vec!["YouTube".to_string()]);
    }

    #[test]
    fn test_absent_key_yields_fallback() {
        let (_dir, store) = temp_store();
        let logins: Vec<String> = store.load(KEY_LOGINS, vec!["default".to_string()]);
        assert_eq!(logins, vec!["default".to_string()]);
    }

    #[test]
    fn test_corrupt_value_yields_fallback_not_error() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("logins.json"), "{not json").unwrap();

        let logins: Vec<String> = store.load(KEY_LOGINS, Vec::new());
        assert!(logins.is_empty());
    }

    #[test]
    fn test_try_load_distinguishes_corrupt_from_absent() {
        let (dir, store) = temp_store();
        assert!(matches!(store.try_load::<Vec<String>>(KEY_LOGINS), Ok(None)));

        std::fs::write(dir.path().join("logins.json"), "{not json").unwrap();
        assert!(matches!(
            store.try_load::<Vec<String>>(KEY_LOGINS),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_wipe_clears_namespace() {
        let (_dir, store) = temp_store();
        store.save(KEY_LOGINS, &vec!["YouTube".to_string()]).unwrap();
        store.save(KEY_ACTIVE_PLATFORM, &"All".to_string()).unwrap();

        store.wipe();

        assert!(matches!(store.try_load::<Vec<String>>(KEY_LOGINS), Ok(None)));
        assert!(matches!(
            store.try_load::<String>(KEY_ACTIVE_PLATFORM),
            Ok(None)
        ));
    }

    #[test]
    fn test_remove_single_key() {
        let (_dir, store) = temp_store();
        store.save(KEY_HISTORY, &vec!["x".to_string()]).unwrap();
        store.remove(KEY_HISTORY);
        assert!(matches!(store.try_load::<Vec<String>>(KEY_HISTORY), Ok(None)));
    }
}
