//! Book catalog construction.
//!
//! Combines per-file chapter discovery with naming and testament facts into
//! the ordered book list the rest of the application navigates by. Built once
//! per corpus load; immutable afterwards.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::bible::names::{book_name_from_filename, short_book_name, testament_from_filename};
use crate::bible::parser::discover_chapters;
use crate::constants::catalog::PLACEHOLDER_CHAPTERS;
use crate::types::Book;

/// Build the ordered book catalog from the source filename list and the
/// decoded content map.
///
/// Filenames that do not match the corpus naming convention cannot be
/// assigned an identity and are skipped outright (logged). A file whose
/// content yields no chapters still gets a catalog entry, with a small
/// placeholder chapter list so navigation keeps working.
#[must_use]
pub fn build_catalog(filenames: &[&str], contents: &HashMap<String, String>) -> Vec<Book> {
    tracing::debug!("building catalog from {} files", filenames.len());

    filenames
        .par_iter()
        .filter_map(|filename| {
            let Some(name) = book_name_from_filename(filename) else {
                tracing::warn!("skipping {filename}: does not match the corpus naming convention");
                return None;
            };

            let testament = testament_from_filename(filename);
            let short_name = short_book_name(name);
            let content = contents.get(*filename).map_or("", String::as_str);

            let mut chapters = discover_chapters(content, &short_name);
            if chapters.is_empty() {
                tracing::warn!("no chapters discovered in {filename}, using placeholder list");
                chapters = PLACEHOLDER_CHAPTERS.to_vec();
            }

            Some(Book {
                id: name.to_string(),
                name: name.to_string(),
                testament,
                chapters,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::Testament;

    fn contents_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_build_catalog_basic() {
        let filenames = ["1-01창세기.txt", "2-01마태복음.txt"];
        let contents = contents_of(&[
            (
                "1-01창세기.txt",
                "창1:1 태초에 하나님이\n창1:2 땅이 혼돈하고\n창2:1 천지와 만물이\n",
            ),
            ("2-01마태복음.txt", "마1:1 아브라함과 다윗의 자손\n"),
        ]);

        let books = build_catalog(&filenames, &contents);
        assert_eq!(books.len(), 2);

        assert_eq!(books[0].id, "창세기");
        assert_eq!(books[0].testament, Testament::Old);
        assert_eq!(books[0].chapters, vec![1, 2]);

        assert_eq!(books[1].id, "마태복음");
        assert_eq!(books[1].testament, Testament::New);
        assert_eq!(books[1].chapters, vec![1]);
    }

    #[test]
    fn test_catalog_preserves_manifest_order() {
        let filenames = ["2-01마태복음.txt", "1-01창세기.txt"];
        let contents = HashMap::new();
        let books = build_catalog(&filenames, &contents);
        assert_eq!(books[0].id, "마태복음");
        assert_eq!(books[1].id, "창세기");
    }

    #[test]
    fn test_missing_content_gets_placeholder_chapters() {
        let filenames = ["1-08룻기.txt"];
        let books = build_catalog(&filenames, &HashMap::new());
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].chapters, vec![1, 2, 3]);
    }

    #[test]
    fn test_unparseable_content_gets_placeholder_chapters() {
        let filenames = ["1-08룻기.txt"];
        let contents = contents_of(&[("1-08룻기.txt", "머리말\n그냥 글\n")]);
        let books = build_catalog(&filenames, &contents);
        assert_eq!(books[0].chapters, vec![1, 2, 3]);
    }

    #[test]
    fn test_unresolved_filename_is_skipped() {
        let filenames = ["README.md", "1-01창세기.txt"];
        let contents = contents_of(&[("1-01창세기.txt", "창1:1 태초에 하나님이\n")]);
        let books = build_catalog(&filenames, &contents);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "창세기");
    }
}
