//! Key-value storage backing the forecast cache
//!
//! The cache only needs string get/put; `ForecastStore` keeps the medium
//! pluggable. `SqliteStore` is the durable default, `MemoryStore` backs
//! tests and `--no-cache` runs.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use tracing::info;

use crate::error::{Error, Result};

pub type StorePool = Pool<SqliteConnectionManager>;
pub type StoreConn = PooledConnection<SqliteConnectionManager>;

/// Durable string key-value collaborator
pub trait ForecastStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed store with connection pooling
#[derive(Clone)]
pub struct SqliteStore {
    pool: StorePool,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref());
        let pool = Pool::builder().max_size(4).build(manager)?;
        let store = Self { pool };
        store.migrate()?;
        info!(path = %path.as_ref().display(), "Forecast cache store ready");
        Ok(store)
    }

    /// In-memory store for tests
    ///
    /// Pool size is pinned to 1: each SQLite `:memory:` connection is its own
    /// database, so every checkout must reuse the same connection.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        let store = Self { pool };
        store.migrate()?;
        Ok(store)
    }

    fn conn(&self) -> Result<StoreConn> {
        self.pool.get().map_err(Error::Pool)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS forecast_cache (
                cache_key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                stored_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            [],
        )?;
        Ok(())
    }
}

impl ForecastStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let payload = conn
            .query_row(
                "SELECT payload FROM forecast_cache WHERE cache_key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO forecast_cache (cache_key, payload, stored_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(cache_key) DO UPDATE SET
                payload = excluded.payload,
                stored_at = excluded.stored_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

/// Volatile store over a `HashMap`
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::InvalidData("Store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::InvalidData("Store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
