use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length, in characters, of the preview text denormalized onto a
/// match record.
pub const PREVIEW_LEN: usize = 80;

/// A single chat message. Immutable once created; there is no edit or
/// delete. Messages are stored unordered and sorted by `created_at` at read
/// time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub match_id: String,
    pub from: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a fresh random identifier and the current
    /// timestamp.
    pub fn new(
        match_id: impl Into<String>,
        from: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("msg_{}", Uuid::new_v4().simple()),
            match_id: match_id.into(),
            from: from.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Preview of the text, truncated to [`PREVIEW_LEN`] characters.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_LEN).collect()
    }
}
