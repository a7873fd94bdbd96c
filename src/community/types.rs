//! Wire types for the hosted backend's REST rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::types::{Comment, UserProfile, VerseKey};

/// A row from the `comments` table.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRow {
    /// Row id.
    pub id: String,
    /// Author's user id.
    pub user_id: String,
    /// Verse key the comment is attached to.
    pub verse_key: String,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Liker user ids; the column is nullable.
    #[serde(default)]
    pub likes: Option<Vec<String>>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            verse_key: VerseKey(row.verse_key),
            content: row.content,
            created_at: row.created_at,
            likes: row.likes.unwrap_or_default(),
        }
    }
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            avatar_url: row.avatar_url,
        }
    }
}

/// A row from the `notes` table (personal meditations).
#[derive(Debug, Clone, Deserialize)]
pub struct NoteRow {
    /// Verse key the note is attached to.
    pub verse_key: String,
    /// Note body.
    pub content: String,
}

/// A row from the `daily_verses` table. Carries only the verse key; content
/// resolution happens against the corpus (see [`crate::services::daily`]).
#[derive(Debug, Clone, Deserialize)]
pub struct DailyVerseRow {
    /// Row id.
    pub id: String,
    /// The date this entry is assigned to.
    pub date: NaiveDate,
    /// Key of the featured verse.
    pub verse_key: String,
    /// Meditation text.
    pub reflection: String,
    /// Optional theme label.
    #[serde(default)]
    pub theme: Option<String>,
}
