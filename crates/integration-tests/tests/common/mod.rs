//! Shared fixtures: SQLite stores + channel bus

use std::sync::Arc;

use sqlx::SqlitePool;
use usecase_core::port::id_provider::UuidProvider;
use usecase_core::port::time_provider::SystemTimeProvider;
use usecase_core::port::{IdProvider, TimeProvider};
use usecase_infra_bus::{event_channel, ChannelPublisher, EventReceiver};
use usecase_infra_sqlite::{create_pool, run_migrations, SqliteAccountStore, SqlitePostStore};

#[allow(dead_code)]
pub struct Fixture {
    pub pool: SqlitePool,
    pub post_store: Arc<SqlitePostStore>,
    pub account_store: Arc<SqliteAccountStore>,
    pub publisher: ChannelPublisher,
    pub events: EventReceiver,
    pub id_provider: Arc<dyn IdProvider>,
    pub time_provider: Arc<dyn TimeProvider>,
}

/// Fixture backed by `database_url` (run migrations first)
pub async fn fixture_at(database_url: &str) -> Fixture {
    let pool = create_pool(database_url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let (publisher, events) = event_channel(64, time_provider.clone());

    Fixture {
        pool: pool.clone(),
        post_store: Arc::new(SqlitePostStore::new(pool.clone())),
        account_store: Arc::new(SqliteAccountStore::new(pool.clone())),
        publisher,
        events,
        id_provider: Arc::new(UuidProvider),
        time_provider,
    }
}

#[allow(dead_code)]
pub async fn fixture() -> Fixture {
    fixture_at("sqlite::memory:").await
}

/// Unique on-disk database URL plus its path for cleanup
#[allow(dead_code)]
pub fn temp_database() -> (String, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("usecase_test_{}.db", uuid::Uuid::new_v4()));
    (format!("sqlite://{}", path.display()), path)
}

/// Remove a temp database together with its WAL sidecar files
#[allow(dead_code)]
pub fn remove_database(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
