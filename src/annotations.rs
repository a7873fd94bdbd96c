//! Personal annotations: highlights and private notes.
//!
//! Local-first storage keyed by the `book-chapter-verse` composite, persisted
//! as JSON in the platform data directory. When a user session exists the
//! note map can additionally be merged from the backend, best-effort — a
//! failed sync never loses local state.
//!
//! Annotations are an overlay: parsed verses are never mutated in place.
//! [`AnnotationStore::decorate`] produces a decorated copy of a chapter with
//! the overlay fields filled in.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::community::BackendClient;
use crate::error::Result;
use crate::types::{Chapter, VerseKey};

/// Store file name inside the data directory.
const STORE_FILE: &str = "annotations.json";

/// Get the application data directory, creating it if needed.
fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("malsseum");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get the store file path. Falls back to a dotfile in the home directory if
/// the platform data directory is unavailable.
fn store_path() -> PathBuf {
    data_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".malsseum_annotations.json")
        },
        |d| d.join(STORE_FILE),
    )
}

/// Personal annotation for one verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Highlight flag.
    #[serde(default)]
    pub highlighted: bool,
    /// Private note text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Annotation {
    /// Whether this annotation carries no data and can be pruned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.highlighted && self.note.is_none()
    }
}

/// Local-first store of per-verse annotations for the current user.
#[derive(Debug)]
pub struct AnnotationStore {
    path: PathBuf,
    entries: HashMap<String, Annotation>,
}

impl AnnotationStore {
    /// Open the store at the default platform location, loading any
    /// previously saved annotations.
    #[must_use]
    pub fn open_default() -> Self {
        Self::open(store_path())
    }

    /// Open a store backed by an explicit file path.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load_entries(&path);
        Self { path, entries }
    }

    fn load_entries(path: &Path) -> HashMap<String, Annotation> {
        match fs_err::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("annotation store at {} is corrupt: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    /// Persist the store to disk.
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| crate::error::Error::Msg(format!("serializing annotations: {e}")))?;
        fs_err::write(&self.path, raw)?;
        Ok(())
    }

    /// The annotation recorded for a verse key, if any.
    #[must_use]
    pub fn annotation(&self, key: &VerseKey) -> Option<&Annotation> {
        self.entries.get(key.as_str())
    }

    /// Number of annotated verses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Toggle the highlight flag for a verse. Returns the new state.
    pub fn toggle_highlight(&mut self, key: &VerseKey) -> bool {
        let entry = self.entries.entry(key.as_str().to_string()).or_default();
        entry.highlighted = !entry.highlighted;
        let highlighted = entry.highlighted;
        self.prune(key);
        highlighted
    }

    /// Set or clear the note for a verse. An empty note clears the entry.
    pub fn set_note(&mut self, key: &VerseKey, note: &str) {
        let note = note.trim();
        if note.is_empty() {
            if let Some(entry) = self.entries.get_mut(key.as_str()) {
                entry.note = None;
            }
            self.prune(key);
        } else {
            let entry = self.entries.entry(key.as_str().to_string()).or_default();
            entry.note = Some(note.to_string());
        }
    }

    /// Drop the entry if it no longer carries any data.
    fn prune(&mut self, key: &VerseKey) {
        if self.entries.get(key.as_str()).is_some_and(Annotation::is_empty) {
            self.entries.remove(key.as_str());
        }
    }

    /// Merge notes fetched from the backend into the local store.
    ///
    /// A remote note that differs from the local one wins; local-only entries
    /// and highlight flags are untouched.
    pub fn merge_remote_notes(&mut self, remote: &HashMap<String, String>) {
        for (key, content) in remote {
            let entry = self.entries.entry(key.clone()).or_default();
            if entry.note.as_deref() != Some(content.as_str()) {
                entry.note = Some(content.clone());
            }
        }
    }

    /// Merge the user's notes from the backend into the local store and
    /// persist the result. Best-effort: a failed fetch or save is logged and
    /// local state is left as it was.
    pub async fn sync_notes(&mut self, client: &BackendClient, user_id: &str) {
        match client.user_notes(user_id).await {
            Ok(remote) => {
                if remote.is_empty() {
                    return;
                }
                self.merge_remote_notes(&remote);
                if let Err(e) = self.save() {
                    tracing::warn!("could not persist synced notes: {e}");
                }
            }
            Err(e) => tracing::warn!("note sync for {user_id} failed: {e}"),
        }
    }

    /// Produce a decorated copy of a chapter with highlight and note overlay
    /// fields filled in, plus public comment counts when provided.
    ///
    /// The input chapter is untouched; parsed content is never written to.
    #[must_use]
    pub fn decorate(&self, chapter: &Chapter, comment_counts: Option<&HashMap<String, u32>>) -> Chapter {
        let mut decorated = chapter.clone();
        for verse in &mut decorated.verses {
            let key = verse.key();
            if let Some(annotation) = self.entries.get(key.as_str()) {
                verse.highlighted = annotation.highlighted;
                verse.note.clone_from(&annotation.note);
            }
            if let Some(counts) = comment_counts {
                verse.comment_count = counts.get(key.as_str()).copied();
            }
        }
        decorated
    }
}
