use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use rusqlite::{params, Connection, OptionalExtension};

/// Settings key under which the logo image URL is persisted.
///
/// The value defaults to absent; the logo block is omitted from the layout
/// until a URL is written here.
pub const LOGO_URL_KEY: &str = "is_a_email_logo";

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while reading or writing settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings engine encountered an internal error.
    EngineError(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::EngineError(msg) => write!(f, "Settings error: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Trait for persisted key-value settings stores.
///
/// Implementations of this trait provide different settings backends, such
/// as in-memory storage or a local database. Values are plain strings; an
/// unset key reads back as `None`. There is no delete operation: a value
/// can only be replaced.
pub trait SettingsStore: Send + Sync {
    /// Returns the persisted value for `key`, or `None` when unset.
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    /// Persists `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> SettingsResult<()>;
}

/// In-memory settings store using a HashMap.
///
/// Contents are lost when the process exits. Useful for testing and for
/// hosts that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Creates a new empty MemorySettingsStore.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Settings store backed by a single-file SQLite database.
///
/// The `settings` table is created lazily on first access; writes use
/// `INSERT OR REPLACE` so a key holds at most one value.
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    path: PathBuf,
}

impl SqliteSettingsStore {
    /// Creates a new SqliteSettingsStore using the database at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> SettingsResult<Connection> {
        let conn = Connection::open(&self.path)
            .map_err(|e| SettingsError::EngineError(e.to_string()))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (key TEXT PRIMARY KEY, value TEXT)",
            [],
        )
        .map_err(|e| SettingsError::EngineError(e.to_string()))?;
        Ok(conn)
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| SettingsError::EngineError(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| SettingsError::EngineError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_store_unset_key() {
        let store = MemorySettingsStore::new();

        assert_eq!(store.get(LOGO_URL_KEY).unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemorySettingsStore::new();

        store.set(LOGO_URL_KEY, "https://example.com/l.png").unwrap();

        assert_eq!(
            store.get(LOGO_URL_KEY).unwrap(),
            Some("https://example.com/l.png".to_string())
        );
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemorySettingsStore::new();

        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();

        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_memory_store_empty_value() {
        let store = MemorySettingsStore::new();

        store.set("key", "").unwrap();

        assert_eq!(store.get("key").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_sqlite_store_unset_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSettingsStore::new(temp_dir.path().join("settings.db"));

        assert_eq!(store.get(LOGO_URL_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSettingsStore::new(temp_dir.path().join("settings.db"));

        store.set(LOGO_URL_KEY, "https://example.com/l.png").unwrap();

        assert_eq!(
            store.get(LOGO_URL_KEY).unwrap(),
            Some("https://example.com/l.png".to_string())
        );
    }

    #[test]
    fn test_sqlite_store_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSettingsStore::new(temp_dir.path().join("settings.db"));

        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();

        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_sqlite_store_persists_across_handles() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("settings.db");

        let store = SqliteSettingsStore::new(&db_path);
        store.set(LOGO_URL_KEY, "https://example.com/l.png").unwrap();
        drop(store);

        let reopened = SqliteSettingsStore::new(&db_path);
        assert_eq!(
            reopened.get(LOGO_URL_KEY).unwrap(),
            Some("https://example.com/l.png".to_string())
        );
    }

    #[test]
    fn test_settings_error_display() {
        assert_eq!(
            SettingsError::EngineError("test".to_string()).to_string(),
            "Settings error: test"
        );
    }
}
