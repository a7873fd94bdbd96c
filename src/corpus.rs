//! Corpus loading and snapshot ownership.
//!
//! [`CorpusService`] owns the asset source and runs the batch load: every
//! source file is fetched and decoded concurrently, each producing a private
//! result that is only merged once it settles. Per-file failures never escape
//! the batch — fetch and decode failures alike fall back to synthesized
//! placeholder text for that book. The finished [`CorpusSnapshot`] is
//! immutable; a reload replaces it wholesale.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use futures::future;
use reqwest::Client;

use crate::bible::catalog::build_catalog;
use crate::bible::encoding::decode_corpus_bytes;
use crate::bible::names::book_name_from_filename;
use crate::bible::parser::parse_book_text;
use crate::bible::virtual_data::{virtual_book_text, virtual_chapter};
use crate::constants::backend::REQUEST_TIMEOUT_SECS;
use crate::constants::{BIBLE_FILES, DATA_DIR};
use crate::error::{Error, Result};
use crate::types::{Book, Chapter, ContentOrigin};

/// Source of raw bytes for named corpus assets.
///
/// Implementations fetch from wherever the source files live; the service
/// treats all of them identically.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the raw byte buffer for a source filename.
    async fn fetch(&self, filename: &str) -> Result<Vec<u8>>;
}

/// Asset source fetching `{base}/data/{filename}` over HTTP.
pub struct HttpAssetSource {
    base_url: String,
    client: Client,
}

impl HttpAssetSource {
    /// Create a source rooted at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch(&self, filename: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{DATA_DIR}/{filename}", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request for {filename} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::asset_status(filename, status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Reading {filename} failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Asset source reading `{root}/data/{filename}` from the local filesystem.
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Create a source rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn fetch(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.root.join(DATA_DIR).join(filename);
        fs_err::read(&path).map_err(|_| Error::asset(filename))
    }
}

/// An immutable view of one fully loaded corpus.
///
/// Downstream readers receive shared references to a snapshot and never
/// mutate its content; personal annotations are layered on separately.
pub struct CorpusSnapshot {
    files: Vec<String>,
    books: Vec<Book>,
    contents: HashMap<String, String>,
    /// Files whose content is synthesized placeholder text.
    synthesized_files: std::collections::HashSet<String>,
}

impl CorpusSnapshot {
    /// The ordered book catalog.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a catalog entry by book id.
    #[must_use]
    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    /// The decoded text backing a book, if its file resolved to this id.
    #[must_use]
    pub fn content_for(&self, book_id: &str) -> Option<&str> {
        self.filename_for(book_id)
            .and_then(|f| self.contents.get(f))
            .map(String::as_str)
    }

    /// Provenance of the text backing a book. Books whose file fell back to
    /// placeholder text report [`ContentOrigin::Synthesized`].
    #[must_use]
    pub fn origin_for(&self, book_id: &str) -> ContentOrigin {
        match self.filename_for(book_id) {
            Some(f) if self.synthesized_files.contains(f) => ContentOrigin::Synthesized,
            _ => ContentOrigin::Source,
        }
    }

    fn filename_for(&self, book_id: &str) -> Option<&String> {
        self.files
            .iter()
            .find(|f| book_name_from_filename(f) == Some(book_id))
    }

    /// Parse a book's full chapter list on demand.
    ///
    /// If the book's whole file was synthesized, the provenance flag is
    /// carried through to every chapter and verse.
    pub fn chapters(&self, book_id: &str) -> Result<Vec<Chapter>> {
        if self.book(book_id).is_none() {
            return Err(Error::BookNotFound { book: book_id.to_string() });
        }
        let content = self.content_for(book_id).unwrap_or_default();
        let mut chapters = parse_book_text(content, book_id);
        if self.origin_for(book_id).is_synthesized() {
            for chapter in &mut chapters {
                chapter.origin = ContentOrigin::Synthesized;
                for verse in &mut chapter.verses {
                    verse.origin = ContentOrigin::Synthesized;
                }
            }
        }
        Ok(chapters)
    }

    /// A single chapter, exactly as parsed.
    ///
    /// Fails with [`Error::ChapterNotFound`] when the chapter number is absent
    /// from the parsed book; [`Self::chapter`] layers the fallback policy on
    /// top of this.
    pub fn parsed_chapter(&self, book_id: &str, number: u32) -> Result<Chapter> {
        self.chapters(book_id)?
            .into_iter()
            .find(|c| c.chapter == number)
            .ok_or_else(|| Error::ChapterNotFound {
                book: book_id.to_string(),
                chapter: number,
            })
    }

    /// A single chapter with the availability-first fallback applied: an
    /// absent chapter is synthesized (and tagged as such) instead of failing
    /// the navigation.
    pub fn chapter(&self, book_id: &str, number: u32) -> Result<Chapter> {
        match self.parsed_chapter(book_id, number) {
            Ok(chapter) => Ok(chapter),
            Err(Error::ChapterNotFound { book, chapter }) => {
                tracing::warn!("chapter {chapter} missing from {book}, serving placeholder");
                Ok(virtual_chapter(&book, chapter))
            }
            Err(e) => Err(e),
        }
    }
}

/// Owns the asset source and the latest corpus snapshot.
pub struct CorpusService {
    source: Box<dyn AssetSource>,
    files: Vec<String>,
    latest: RwLock<Option<Arc<CorpusSnapshot>>>,
}

impl CorpusService {
    /// Create a service over the full canonical file list.
    #[must_use]
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self::with_files(source, BIBLE_FILES.iter().map(|f| (*f).to_string()).collect())
    }

    /// Create a service over an explicit file list (test corpora, subsets).
    #[must_use]
    pub fn with_files(source: Box<dyn AssetSource>, files: Vec<String>) -> Self {
        Self {
            source,
            files,
            latest: RwLock::new(None),
        }
    }

    /// Load the whole corpus as a single batch and publish the snapshot.
    ///
    /// The snapshot is only produced after every file's load has settled;
    /// partial catalogs are never exposed. Individual failures are absorbed
    /// by the placeholder fallback — the error position is reserved for total
    /// orchestrator failure.
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub async fn load(&self) -> Result<Arc<CorpusSnapshot>> {
        tracing::info!("loading corpus: {} source files", self.files.len());

        let loads = self.files.iter().map(|filename| self.load_file(filename));
        let results = future::join_all(loads).await;

        let mut contents: HashMap<String, String> = HashMap::new();
        let mut synthesized_files = std::collections::HashSet::new();
        for (filename, text, origin) in results.into_iter().flatten() {
            if origin.is_synthesized() {
                synthesized_files.insert(filename.clone());
            }
            contents.insert(filename, text);
        }

        let filenames: Vec<&str> = self.files.iter().map(String::as_str).collect();
        let books = build_catalog(&filenames, &contents);
        tracing::info!("corpus loaded: {} books", books.len());

        let snapshot = Arc::new(CorpusSnapshot {
            files: self.files.clone(),
            books,
            contents,
            synthesized_files,
        });

        if let Ok(mut latest) = self.latest.write() {
            *latest = Some(Arc::clone(&snapshot));
        }
        Ok(snapshot)
    }

    /// The most recently loaded snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CorpusSnapshot>> {
        self.latest.read().ok().and_then(|s| s.as_ref().map(Arc::clone))
    }

    /// Load one file to decoded text, applying the per-file fallback policy.
    ///
    /// Returns `None` only for files whose name cannot be resolved to a book
    /// — without an identity there is nothing meaningful to synthesize.
    async fn load_file(&self, filename: &str) -> Option<(String, String, ContentOrigin)> {
        let Some(book_name) = book_name_from_filename(filename) else {
            tracing::warn!("skipping unresolvable source file {filename}");
            return None;
        };

        let (text, origin) = match self.fetch_and_decode(filename).await {
            Ok(text) => (text, ContentOrigin::Source),
            Err(e) if e.is_recoverable_load_failure() => {
                tracing::warn!("{e}; using placeholder content for {book_name}");
                (virtual_book_text(book_name), ContentOrigin::Synthesized)
            }
            Err(e) => {
                tracing::error!("unexpected failure loading {filename}: {e}");
                (virtual_book_text(book_name), ContentOrigin::Synthesized)
            }
        };

        Some((filename.to_string(), text, origin))
    }

    async fn fetch_and_decode(&self, filename: &str) -> Result<String> {
        let bytes = self.source.fetch(filename).await?;
        decode_corpus_bytes(&bytes, filename)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::ContentOrigin;

    /// In-memory asset source for exercising the load pipeline.
    struct MapAssetSource {
        assets: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl AssetSource for MapAssetSource {
        async fn fetch(&self, filename: &str) -> Result<Vec<u8>> {
            self.assets
                .get(filename)
                .cloned()
                .ok_or_else(|| Error::asset(filename))
        }
    }

    fn service_with(assets: &[(&str, &str)], files: &[&str]) -> CorpusService {
        let assets = assets
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.as_bytes().to_vec()))
            .collect();
        CorpusService::with_files(
            Box::new(MapAssetSource { assets }),
            files.iter().map(|f| (*f).to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_load_parses_real_content() {
        let service = service_with(
            &[(
                "1-01창세기.txt",
                "창1:1 태초에 하나님이 천지를 창조하시니라\n창2:1 천지와 만물이\n",
            )],
            &["1-01창세기.txt"],
        );

        let snapshot = service.load().await.unwrap();
        assert_eq!(snapshot.books().len(), 1);
        assert_eq!(snapshot.books()[0].chapters, vec![1, 2]);

        let chapter = snapshot.chapter("창세기", 1).unwrap();
        assert_eq!(chapter.verses.len(), 1);
        assert_eq!(chapter.verses[0].content, "태초에 하나님이 천지를 창조하시니라");
        assert_eq!(chapter.origin, ContentOrigin::Source);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_placeholder() {
        let service = service_with(&[], &["1-08룻기.txt"]);
        let snapshot = service.load().await.unwrap();

        // The catalog still contains the book, with a non-empty chapter list.
        let book = snapshot.book("룻기").unwrap();
        assert!(!book.chapters.is_empty());

        // The content keeps navigation working but is tagged as synthesized.
        assert_eq!(snapshot.origin_for("룻기"), ContentOrigin::Synthesized);
        let chapter = snapshot.chapter("룻기", 1).unwrap();
        assert!(!chapter.verses.is_empty());
        assert!(chapter.origin.is_synthesized());
        assert!(chapter.verses.iter().all(|v| v.origin.is_synthesized()));
    }

    #[tokio::test]
    async fn test_missing_chapter_is_synthesized() {
        let service = service_with(
            &[("1-01창세기.txt", "창1:1 태초에 하나님이\n")],
            &["1-01창세기.txt"],
        );
        let snapshot = service.load().await.unwrap();

        assert!(matches!(
            snapshot.parsed_chapter("창세기", 7),
            Err(Error::ChapterNotFound { .. })
        ));

        let chapter = snapshot.chapter("창세기", 7).unwrap();
        assert_eq!(chapter.chapter, 7);
        assert!(chapter.origin.is_synthesized());
    }

    #[tokio::test]
    async fn test_unknown_book_is_an_error() {
        let service = service_with(&[], &[]);
        let snapshot = service.load().await.unwrap();
        assert!(matches!(
            snapshot.chapter("외경", 1),
            Err(Error::BookNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unresolvable_filename_is_skipped() {
        let service = service_with(&[("notes.txt", "1:1 본문")], &["notes.txt"]);
        let snapshot = service.load().await.unwrap();
        assert!(snapshot.books().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_published() {
        let service = service_with(
            &[("1-01창세기.txt", "창1:1 태초에 하나님이\n")],
            &["1-01창세기.txt"],
        );
        assert!(service.snapshot().is_none());
        let loaded = service.load().await.unwrap();
        let published = service.snapshot().unwrap();
        assert!(Arc::ptr_eq(&loaded, &published));
    }
}
