//! JSON key-value store with a Postgres backend and an in-process backend.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Cloneable handle to the cache. Clones share the same underlying storage.
#[derive(Debug, Clone)]
pub struct KvStore {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Postgres(PgPool),
    Memory(Arc<RwLock<HashMap<String, Value>>>),
}

impl KvStore {
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            inner: Inner::Postgres(pool),
        }
    }

    /// Process-local store. Contents are lost on restart.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            inner: Inner::Memory(Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    #[must_use]
    pub fn backend(&self) -> StoreBackend {
        match self.inner {
            Inner::Postgres(_) => StoreBackend::Postgres,
            Inner::Memory(_) => StoreBackend::Memory,
        }
    }

    /// Fetch the raw JSON stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] on database failure.
    pub async fn get_value(&self, key: &str) -> Result<Option<Value>, DbError> {
        match &self.inner {
            Inner::Postgres(pool) => Ok(sqlx::query_scalar::<_, Value>(
                "SELECT value FROM kv_store WHERE key = $1",
            )
            .bind(key)
            .fetch_optional(pool)
            .await?),
            Inner::Memory(map) => Ok(map.read().await.get(key).cloned()),
        }
    }

    /// Insert or overwrite the JSON stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] on database failure.
    pub async fn set_value(&self, key: &str, value: Value) -> Result<(), DbError> {
        match &self.inner {
            Inner::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO kv_store (key, value) VALUES ($1, $2) \
                     ON CONFLICT (key) DO UPDATE SET \
                       value      = EXCLUDED.value, \
                       updated_at = NOW()",
                )
                .bind(key)
                .bind(value)
                .execute(pool)
                .await?;
            }
            Inner::Memory(map) => {
                map.write().await.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove `key`. Returns whether a value was present.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] on database failure.
    pub async fn delete(&self, key: &str) -> Result<bool, DbError> {
        match &self.inner {
            Inner::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM kv_store WHERE key = $1")
                    .bind(key)
                    .execute(pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            Inner::Memory(map) => Ok(map.write().await.remove(key).is_some()),
        }
    }

    /// Fetch and decode the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if the stored JSON does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        match self.get_value(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Like [`KvStore::get`], but a missing key is [`DbError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] when nothing is stored under `key`.
    pub async fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, DbError> {
        self.get(key)
            .await?
            .ok_or_else(|| DbError::NotFound(key.to_string()))
    }

    /// Encode and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if `value` cannot be encoded.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value).await
    }

    /// Verify the backend is reachable. The memory backend always is.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the Postgres ping fails.
    pub async fn health_check(&self) -> Result<(), DbError> {
        match &self.inner {
            Inner::Postgres(pool) => crate::ping(pool).await.map_err(DbError::from),
            Inner::Memory(_) => Ok(()),
        }
    }
}
