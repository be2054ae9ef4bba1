//! Local session storage holding the logged-in user record

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::errors::{BilledError, Result};
use crate::models::User;

/// Key of the JSON user record
pub const USER_KEY: &str = "user";
/// Key of the API token written at login
pub const JWT_KEY: &str = "jwt";

/// String key-value store, read by controllers and written at login
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Decode the user record, failing with `MissingSession` when absent
pub async fn current_user(store: &dyn SessionStore) -> Result<User> {
    let raw = store
        .get_item(USER_KEY)
        .await?
        .ok_or(BilledError::MissingSession)?;
    Ok(serde_json::from_str(&raw)?)
}

pub async fn save_user(store: &dyn SessionStore, user: &User) -> Result<()> {
    store.set_item(USER_KEY, &serde_json::to_string(user)?).await
}

/// Session store persisted in a SQLite key-value table
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub async fn new(database_path: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Path::new(database_path).exists() {
            std::fs::File::create(database_path)?;
        }

        let database_url = format!("sqlite://{}", database_path);
        let pool = SqlitePool::connect(&database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await?;

        debug!("Opened session store at {}", database_path);
        Ok(SqliteSessionStore { pool })
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO local_storage (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Session store kept in process memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `user`
    pub fn with_user(user: &User) -> Result<Self> {
        let store = Self::new();
        store
            .items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(USER_KEY.to_string(), serde_json::to_string(user)?);
        Ok(store)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use tempfile::TempDir;

    fn employee() -> User {
        User {
            user_type: UserType::Employee,
            email: "employee@test.tld".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sqlite_store_round_trips_user() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.db");
        let store = SqliteSessionStore::new(path.to_str().unwrap()).await.unwrap();

        assert!(matches!(current_user(&store).await, Err(BilledError::MissingSession)));

        save_user(&store, &employee()).await.unwrap();
        assert_eq!(current_user(&store).await.unwrap(), employee());

        store.set_item(JWT_KEY, "token").await.unwrap();
        store.set_item(JWT_KEY, "token-2").await.unwrap();
        assert_eq!(store.get_item(JWT_KEY).await.unwrap().as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn test_memory_store_with_user() {
        let store = MemorySessionStore::with_user(&employee()).unwrap();
        assert_eq!(current_user(&store).await.unwrap().email, "employee@test.tld");
        assert_eq!(store.get_item("missing").await.unwrap(), None);
    }
}
