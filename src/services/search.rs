//! Book search over the catalog.
//!
//! Substring matches win outright; fuzzy matches fill the remainder, ranked
//! by score. An empty query returns the whole catalog.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::MAX_SEARCH_RESULTS;
use crate::types::Book;

/// Minimum fuzzy score for a match to count.
const MIN_SCORE: i64 = 50;

/// Search the catalog for books matching a query.
///
/// Case-insensitive substring matches come first in catalog order, then
/// fuzzy matches ranked by score, capped at the result limit.
#[must_use]
pub fn search_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let query = query.trim();
    if query.is_empty() {
        return books.iter().collect();
    }

    let query_lower = query.to_lowercase();
    let mut results: Vec<&Book> = books
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&query_lower))
        .collect();

    if results.len() < MAX_SEARCH_RESULTS {
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &Book)> = books
            .iter()
            .filter(|b| !results.iter().any(|r| r.id == b.id))
            .filter_map(|b| {
                let score = matcher.fuzzy_match(&b.name, query)?;
                (score >= MIN_SCORE).then_some((score, b))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        results.extend(scored.into_iter().map(|(_, b)| b));
    }

    results.truncate(MAX_SEARCH_RESULTS);
    results
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::Testament;

    fn book(name: &str, testament: Testament) -> Book {
        Book {
            id: name.to_string(),
            name: name.to_string(),
            testament,
            chapters: vec![1],
        }
    }

    fn sample_books() -> Vec<Book> {
        vec![
            book("창세기", Testament::Old),
            book("요한복음", Testament::New),
            book("요한일서", Testament::New),
            book("요한계시록", Testament::New),
        ]
    }

    #[test]
    fn test_empty_query_returns_all() {
        let books = sample_books();
        assert_eq!(search_books(&books, "").len(), 4);
        assert_eq!(search_books(&books, "   ").len(), 4);
    }

    #[test]
    fn test_substring_match() {
        let books = sample_books();
        let results = search_books(&books, "요한");
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|b| b.name.contains("요한")));
    }

    #[test]
    fn test_substring_preserves_catalog_order() {
        let books = sample_books();
        let results = search_books(&books, "요한");
        let names: Vec<&str> = results.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["요한복음", "요한일서", "요한계시록"]);
    }

    #[test]
    fn test_exact_match() {
        let books = sample_books();
        let results = search_books(&books, "창세기");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "창세기");
    }

    #[test]
    fn test_no_match() {
        let books = sample_books();
        assert!(search_books(&books, "전혀다른말").is_empty());
    }
}
