//! SQLite-backed key/value storage.
//!
//! sqlx is async; the store is not. The backend owns a current-thread Tokio
//! runtime and blocks on every statement so callers see plain synchronous
//! calls.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::runtime::Runtime;

use super::KeyValueStorage;
use crate::error::StorageError;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS kv_store (
        key        TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const UPSERT: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key)
    DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

/// Durable storage in a single `kv_store` table.
#[derive(Debug)]
pub struct SqliteStorage {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create storage directory at {parent:?}"))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        Self::connect(options, 4)
            .with_context(|| format!("failed to open SQLite storage at {path:?}"))
    }

    /// Private in-memory database; contents vanish when the value is dropped.
    pub fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("invalid in-memory SQLite URL")?;
        // Every connection to `:memory:` is a separate database, so pin the pool to one.
        Self::connect(options, 1).context("failed to open in-memory SQLite storage")
    }

    fn connect(options: SqliteConnectOptions, max_connections: u32) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to create runtime for SQLite storage")?;

        let pool = runtime
            .block_on(async {
                SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            })
            .context("failed to create SQLite pool")?;

        runtime
            .block_on(sqlx::query(CREATE_TABLE).execute(&pool))
            .context("failed to create kv_store table")?;

        tracing::debug!("SQLite storage ready");
        Ok(Self { runtime, pool })
    }
}

impl Drop for SqliteStorage {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.runtime.block_on(
            sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool),
        )?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.runtime.block_on(
            sqlx::query(UPSERT)
                .bind(key)
                .bind(value)
                .bind(&now)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.runtime.block_on(
            sqlx::query("DELETE FROM kv_store WHERE key = ?1")
                .bind(key)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            for (key, value) in entries {
                sqlx::query(UPSERT)
                    .bind(*key)
                    .bind(value.as_str())
                    .bind(&now)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await
        })?;
        Ok(())
    }
}
