#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use tempfile::TempDir;

use scrawl::store::PageStore;

/// A store backed by a SQLite file in a temp directory. The directory must
/// outlive the store, so it is handed back to the caller.
pub async fn temp_store() -> (TempDir, Arc<PageStore>) {
    let (dir, pool) = temp_pool().await;
    let store = PageStore::new(pool);
    store.init().await.unwrap();
    (dir, Arc::new(store))
}

pub async fn temp_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("pages.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .unwrap();
    (dir, pool)
}
