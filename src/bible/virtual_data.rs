//! Placeholder content generation.
//!
//! Last-resort content used when a source file cannot be fetched or decoded,
//! or when a requested chapter is missing from a parsed book. Keeps
//! navigation functional; everything produced here is tagged
//! [`ContentOrigin::Synthesized`] so callers can tell it from real text.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::bible::names::short_book_name;
use crate::constants::synth::{DEFAULT_CHAPTER_COUNT, VERSES_PER_CHAPTER};
use crate::types::{Chapter, ContentOrigin, Verse};

lazy_static! {
    /// Canonical chapter counts for the books large enough that a 10-chapter
    /// placeholder would be conspicuously wrong.
    static ref KNOWN_CHAPTER_COUNTS: HashMap<&'static str, u32> = {
        let mut m = HashMap::new();
        m.insert("창세기", 50);
        m.insert("출애굽기", 40);
        m.insert("레위기", 27);
        m.insert("민수기", 36);
        m.insert("신명기", 34);
        m
    };
}

/// Chapter count used when synthesizing a whole book.
#[must_use]
pub fn chapter_count_for(book_name: &str) -> u32 {
    KNOWN_CHAPTER_COUNTS
        .get(book_name)
        .copied()
        .unwrap_or(DEFAULT_CHAPTER_COUNT)
}

/// Generate placeholder source text for an entire book, in the same line
/// format the parser consumes (`창1:1 ...`), ten verses per chapter.
#[must_use]
pub fn virtual_book_text(book_name: &str) -> String {
    let short_name = short_book_name(book_name);
    let chapter_count = chapter_count_for(book_name);
    tracing::warn!("synthesizing placeholder text for {book_name} ({chapter_count} chapters)");

    let mut text = String::new();
    for chapter in 1..=chapter_count {
        for verse in 1..=VERSES_PER_CHAPTER {
            text.push_str(&format!(
                "{short_name}{chapter}:{verse} 이것은 {book_name} {chapter}장 {verse}절의 가상 데이터입니다.\n"
            ));
        }
    }
    text
}

/// Synthesize a single placeholder chapter, for when one requested chapter is
/// absent from an otherwise parsed book.
#[must_use]
pub fn virtual_chapter(book_name: &str, chapter: u32) -> Chapter {
    tracing::warn!("synthesizing placeholder chapter {chapter} for {book_name}");

    let verses = (1..=VERSES_PER_CHAPTER)
        .map(|verse| {
            let mut v = Verse::new(
                book_name,
                chapter,
                verse,
                format!("이것은 {book_name} {chapter}장 {verse}절의 가상 데이터입니다."),
            );
            v.origin = ContentOrigin::Synthesized;
            v
        })
        .collect();

    Chapter {
        book: book_name.to_string(),
        chapter,
        verses,
        origin: ContentOrigin::Synthesized,
    }
}
