//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

/// A blog post as stored. The id is assigned by the store on creation and is
/// never reused; `deleted_at` set marks the row soft-deleted and excludes it
/// from list/get results without physical removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl PostRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
