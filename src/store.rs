use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;

pub const KEY_PREFIX: &str = "@spellright_";

/// Every record the app persists. Each key is independent; a missing key means "use default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Onboarded,
    UserName,
    Settings,
    Stats,
    LastPractice,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Onboarded,
        StorageKey::UserName,
        StorageKey::Settings,
        StorageKey::Stats,
        StorageKey::LastPractice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Onboarded => "@spellright_onboarded",
            StorageKey::UserName => "@spellright_username",
            StorageKey::Settings => "@spellright_settings",
            StorageKey::Stats => "@spellright_stats",
            StorageKey::LastPractice => "@spellright_last_practice",
        }
    }
}

/// String key-value storage primitive
pub trait KvStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;
    fn set(&mut self, key: StorageKey, value: &str) -> Result<()>;
    /// Write several keys together; either all land or none do.
    fn multi_set(&mut self, entries: &[(StorageKey, String)]) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// SQLite-backed store: a single `kv` table in the state directory
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_default() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("spellright.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path.as_ref())?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: StorageKey, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
            params![key.as_str(), value],
        )?;
        Ok(())
    }

    fn multi_set(&mut self, entries: &[(StorageKey, String)]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                r#"
                INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
                "#,
                params![key.as_str(), value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

/// Volatile store for tests and `--no-save` style runs. Writes can be made to fail.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<StorageKey, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always error, for exercising the swallow-and-continue paths
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn with_entry(mut self, key: StorageKey, value: &str) -> Self {
        self.entries.insert(key, value.to_string());
        self
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::other("memory store is read-only").into());
        }
        Ok(())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn set(&mut self, key: StorageKey, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.insert(key, value.to_string());
        Ok(())
    }

    fn multi_set(&mut self, entries: &[(StorageKey, String)]) -> Result<()> {
        self.check_writable()?;
        for (key, value) in entries {
            self.entries.insert(*key, value.clone());
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_writable()?;
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_keys_are_prefixed() {
        for key in StorageKey::ALL {
            assert!(key.as_str().starts_with(KEY_PREFIX));
        }
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get(StorageKey::Stats).unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.set(StorageKey::UserName, "ada").unwrap();
        store.set(StorageKey::UserName, "grace").unwrap();
        assert_eq!(
            store.get(StorageKey::UserName).unwrap().as_deref(),
            Some("grace")
        );
    }

    #[test]
    fn test_multi_set_and_clear() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .multi_set(&[
                (StorageKey::Onboarded, "true".to_string()),
                (StorageKey::UserName, "ada".to_string()),
            ])
            .unwrap();
        assert_eq!(
            store.get(StorageKey::Onboarded).unwrap().as_deref(),
            Some("true")
        );
        store.clear().unwrap();
        assert_eq!(store.get(StorageKey::Onboarded).unwrap(), None);
        assert_eq!(store.get(StorageKey::UserName).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("spellright.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set(StorageKey::LastPractice, "2026-10-18").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get(StorageKey::LastPractice).unwrap().as_deref(),
            Some("2026-10-18")
        );
    }

    #[test]
    fn test_failing_memory_store() {
        let mut store = MemoryStore::failing().with_entry(StorageKey::UserName, "ada");
        assert!(store.set(StorageKey::UserName, "bob").is_err());
        assert_eq!(
            store.get(StorageKey::UserName).unwrap().as_deref(),
            Some("ada")
        );
    }
}
