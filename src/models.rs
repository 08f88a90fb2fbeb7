use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored version of a page. `id` is the primary key and never changes;
/// `slug` is the user-facing name and is deliberately not unique, so several
/// records may answer to the same slug. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PageRecord {
    pub id: String,
    pub slug: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

/// Client -> server frame on the live edit channel. An empty `id` is a
/// no-op message that still gets acknowledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessage {
    pub id: String,
    pub slug: String,
    pub data: String,
}

/// Server -> client reply. Every received frame produces exactly one ack;
/// `success` is false when the persist failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
    pub success: bool,
}
