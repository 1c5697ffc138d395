//! SQLite-backed preference store.

use async_trait::async_trait;
use campus_core::{config::StoreConfig, error::CampusError, shellexpand, traits::PreferenceStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Ordered schema migrations: (name, sql).
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_preferences",
    "CREATE TABLE IF NOT EXISTS preferences (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );",
)];

/// Persistent preference store backed by SQLite.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the store, running migrations on first use.
    pub async fn new(config: &StoreConfig) -> Result<Self, CampusError> {
        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| CampusError::Store(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(opts)
            .await
            .map_err(|e| CampusError::Store(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("Preference store initialized at {db_path}");

        Ok(Self { pool })
    }

    /// In-memory store, for tests and ephemeral sessions.
    pub async fn in_memory() -> Result<Self, CampusError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| CampusError::Store(format!("invalid db path: {e}")))?;
        // A single connection: every in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .map_err(|e| CampusError::Store(format!("failed to open sqlite: {e}")))?;
        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), CampusError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| CampusError::Store(format!("failed to create migrations table: {e}")))?;

        for (name, sql) in MIGRATIONS {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| CampusError::Store(format!("failed to check migration {name}: {e}")))?;
            if applied.is_some() {
                continue;
            }
            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| CampusError::Store(format!("migration {name} failed: {e}")))?;
            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| CampusError::Store(format!("failed to record migration {name}: {e}")))?;
            info!("applied migration {name}");
        }
        Ok(())
    }

    /// Remove a preference. Returns whether a value existed.
    pub async fn remove(&self, key: &str) -> Result<bool, CampusError> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| CampusError::Store(format!("failed to delete {key}: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PreferenceStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, CampusError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CampusError::Store(format!("failed to read {key}: {e}")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CampusError> {
        sqlx::query(
            "INSERT INTO preferences (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| CampusError::Store(format!("failed to write {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::locale::PREFERENCE_KEY;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = Store::in_memory().await.unwrap();
        assert_eq!(store.get(PREFERENCE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let store = Store::in_memory().await.unwrap();
        store.set(PREFERENCE_KEY, "en").await.unwrap();
        assert_eq!(store.get(PREFERENCE_KEY).await.unwrap().as_deref(), Some("en"));

        store.set(PREFERENCE_KEY, "kg").await.unwrap();
        assert_eq!(store.get(PREFERENCE_KEY).await.unwrap().as_deref(), Some("kg"));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = Store::in_memory().await.unwrap();
        store.set("theme", "dark").await.unwrap();
        assert!(store.remove("theme").await.unwrap());
        assert!(!store.remove("theme").await.unwrap());
        assert_eq!(store.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let store = Store::in_memory().await.unwrap();
        Store::run_migrations(&store.pool).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count.0, MIGRATIONS.len() as i64);
    }

    #[tokio::test]
    async fn test_file_backed_store_persists() {
        let dir = std::env::temp_dir().join(format!("__campus_store_{}__", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = StoreConfig {
            db_path: dir.join("prefs.db").to_string_lossy().to_string(),
        };

        {
            let store = Store::new(&config).await.unwrap();
            store.set(PREFERENCE_KEY, "ru").await.unwrap();
            store.pool.close().await;
        }
        let reopened = Store::new(&config).await.unwrap();
        assert_eq!(reopened.get(PREFERENCE_KEY).await.unwrap().as_deref(), Some("ru"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
