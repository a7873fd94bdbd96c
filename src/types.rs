//! Core type definitions for the corpus data model.
//!
//! Verses, chapters and books are constructed synchronously during corpus
//! load and never mutated afterwards; overlay data (highlights, notes,
//! comment counts) is layered onto decorated copies, keyed by [`VerseKey`].

use serde::{Deserialize, Serialize};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

/// Testament classification of a book, derived from the filename's leading
/// numeral (`1-` = old, anything else = new). Not content-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    /// Old testament (filename prefix `1-`).
    Old,
    /// New testament.
    New,
}

impl Testament {
    /// Returns the wire/display name of this testament.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provenance of parsed content.
///
/// Synthesized placeholder text is deliberately indistinguishable from real
/// text at the UI layer, but the origin is tracked internally so downstream
/// code can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentOrigin {
    /// Parsed from a real source file.
    #[default]
    Source,
    /// Generated placeholder content.
    Synthesized,
}

impl ContentOrigin {
    /// Whether this content was generated rather than parsed.
    #[must_use]
    pub const fn is_synthesized(self) -> bool {
        matches!(self, Self::Synthesized)
    }
}

/// Composite identifier `book-chapter-verse` used for annotation and comment
/// lookups (e.g. `창세기-1-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseKey(pub String);

impl VerseKey {
    /// Build a key from its components.
    #[must_use]
    pub fn new(book: &str, chapter: u32, verse: u32) -> Self {
        Self(format!("{book}-{chapter}-{verse}"))
    }

    /// Split a key back into `(book, chapter, verse)`.
    ///
    /// Returns `None` if the key does not have the expected shape. Book names
    /// in this corpus never contain hyphens, so the first two `-` separators
    /// from the right are the split points.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, u32, u32)> {
        let (rest, verse) = self.0.rsplit_once('-')?;
        let (book, chapter) = rest.rsplit_once('-')?;
        let chapter = chapter.parse().ok()?;
        let verse = verse.parse().ok()?;
        Some((book, chapter, verse))
    }

    /// The raw key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The smallest addressable unit of text, unique within a chapter by its
/// positive verse number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Canonical book name (e.g. `창세기`).
    pub book: String,
    /// Chapter number (positive).
    pub chapter: u32,
    /// Verse number (positive).
    pub verse: u32,
    /// Verse text, possibly accumulated from continuation lines.
    pub content: String,
    /// Provenance of the content.
    #[serde(default)]
    pub origin: ContentOrigin,
    /// Overlay: personal highlight flag.
    #[serde(default)]
    pub highlighted: bool,
    /// Overlay: personal note text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Overlay: number of public comments on this verse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u32>,
}

impl Verse {
    /// Create a parsed verse with no overlay data.
    #[must_use]
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32, content: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
            content: content.into(),
            origin: ContentOrigin::Source,
            highlighted: false,
            note: None,
            comment_count: None,
        }
    }

    /// The `book-chapter-verse` lookup key of this verse.
    #[must_use]
    pub fn key(&self) -> VerseKey {
        VerseKey::new(&self.book, self.chapter, self.verse)
    }
}

/// A numbered subdivision of a book holding an ordered list of verses
/// (ascending by verse number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Canonical book name.
    pub book: String,
    /// Chapter number (positive).
    pub chapter: u32,
    /// Verses, sorted ascending by verse number.
    pub verses: Vec<Verse>,
    /// Provenance of the chapter's content.
    #[serde(default)]
    pub origin: ContentOrigin,
}

/// One top-level division of the corpus, identified by the canonical name
/// derived from its source filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book identifier (same as the canonical name in this corpus).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Testament classification.
    pub testament: Testament,
    /// Chapter numbers present, ascending; not assumed contiguous.
    pub chapters: Vec<u32>,
}

/// A public comment on a verse, stored in the shared backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Backend row id.
    pub id: String,
    /// Author's user id.
    pub user_id: String,
    /// The verse this comment is attached to.
    pub verse_key: VerseKey,
    /// Comment body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Ids of users who liked this comment.
    pub likes: Vec<String>,
}

impl Comment {
    /// Whether the given user has liked this comment.
    #[must_use]
    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }
}

/// A user profile from the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A curated daily verse entry with its meditation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVerse {
    /// Backend row id.
    pub id: String,
    /// The date this entry is assigned to.
    pub date: NaiveDate,
    /// Key of the featured verse.
    pub verse_key: VerseKey,
    /// Resolved verse content.
    pub verse: Verse,
    /// Meditation text accompanying the verse.
    pub reflection: String,
    /// Optional theme label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}
