// Page store - durable keyed storage with a non-unique slug index
//
// One SQLite table holds every page record, keyed by id. Slugs are looked
// up through a secondary index and are allowed to collide; the resolver
// deals with collision sets, the store just reports them.

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::id_generator::IdGenerator;
use crate::models::PageRecord;

const WRITE_SHARDS: usize = 64;

pub struct PageStore {
    pool: SqlitePool,
    ids: IdGenerator,
    // Sharded by id hash: saves to the same id serialize, saves to
    // different ids almost always proceed concurrently.
    write_locks: Vec<Mutex<()>>,
}

impl PageStore {
    pub fn new(pool: SqlitePool) -> Self {
        PageStore {
            pool,
            ids: IdGenerator::new(),
            write_locks: (0..WRITE_SHARDS).map(|_| Mutex::new(())).collect(),
        }
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pages (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                modified_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_pages_slug ON pages(slug)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn lock_for(&self, id: &str) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        &self.write_locks[(hasher.finish() as usize) % WRITE_SHARDS]
    }

    /// True iff at least one record carries this slug. Read-only.
    pub async fn exists(&self, slug: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM pages WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Every record carrying this slug, newest modification first. The
    /// descending order keeps collision listings deterministic.
    pub async fn lookup(&self, slug: &str) -> AppResult<Vec<PageRecord>> {
        let records = sqlx::query_as::<_, PageRecord>(
            "SELECT id, slug, content, created_at, modified_at
             FROM pages WHERE slug = ? ORDER BY modified_at DESC",
        )
        .bind(slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Mint a fresh id and insert a new record. Always inserts, even when
    /// other records already carry the slug; that is how collision sets
    /// come to exist.
    pub async fn create(&self, slug: &str, content: &str) -> AppResult<PageRecord> {
        let now = Utc::now().timestamp_millis();
        let record = PageRecord {
            id: self.ids.generate(),
            slug: slug.to_string(),
            content: content.to_string(),
            created_at: now,
            modified_at: now,
        };

        sqlx::query(
            "INSERT INTO pages (id, slug, content, created_at, modified_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.slug)
        .bind(&record.content)
        .bind(record.created_at)
        .bind(record.modified_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Upsert by id: an existing record keeps its `created_at` and gets
    /// `slug`, `content` and `modified_at` replaced; a missing record is
    /// created with this exact id (the client mints ids before its first
    /// save round-trips). Writes to the same id serialize through the
    /// shard lock, so racing autosaves cannot tear a row.
    pub async fn save(
        &self,
        id: &str,
        slug: &str,
        content: &str,
        modified_at: i64,
    ) -> AppResult<()> {
        let _guard = self.lock_for(id).lock().await;

        sqlx::query(
            "INSERT INTO pages (id, slug, content, created_at, modified_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 slug = excluded.slug,
                 content = excluded.content,
                 modified_at = excluded.modified_at",
        )
        .bind(id)
        .bind(slug)
        .bind(content)
        .bind(modified_at)
        .bind(modified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
