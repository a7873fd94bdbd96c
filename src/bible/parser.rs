//! Line-oriented recovery of chapters and verses from raw book text.
//!
//! The source files are inconsistently formatted: verse lines appear in
//! several mutually incompatible shapes, some files wrap long verses across
//! lines with no continuation markup, and a few repeat verse numbers. The
//! parser tries an ordered list of candidate patterns per line — the order is
//! behavior, not an implementation detail — folds unmatched text into the
//! previous verse, and drops repeated verse numbers (first seen wins).

use std::collections::BTreeMap;

use regex::Regex;

use crate::bible::names::short_book_name;
use crate::constants::parser::CONTINUATION_MIN_CHARS;
use crate::types::{Chapter, Verse};

/// The candidate line shapes, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// `창1:1 내용` — abbreviation glued to `chapter:verse`.
    Exact,
    /// `창 1 : 1 내용` — whitespace tolerated around digits and the colon.
    Spaced,
    /// `<창 1:1> 내용` — angle-bracket tag form.
    Tagged,
    /// `창 1장 1절 내용` — verbose chapter/verse word form.
    ChapterWord,
    /// `1:1 내용` — bare numeric form with no book prefix.
    Bare,
    /// `101 내용` — concatenated digits, the final two read as the verse.
    ConcatenatedDigits,
}

impl PatternKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Spaced => "spaced",
            Self::Tagged => "tagged",
            Self::ChapterWord => "chapter-word",
            Self::Bare => "bare",
            Self::ConcatenatedDigits => "concatenated-digits",
        }
    }
}

/// A structured match recovered from one line.
struct LineMatch {
    chapter: u32,
    verse: u32,
    content: String,
}

/// The compiled candidate patterns for one book's abbreviation.
struct VerseLinePatterns {
    matchers: Vec<(PatternKind, Regex)>,
}

impl VerseLinePatterns {
    /// Compile the full pattern list for verse parsing.
    fn for_verses(short_name: &str) -> Result<Self, regex::Error> {
        let abbr = regex::escape(short_name);
        let matchers = vec![
            (PatternKind::Exact, Regex::new(&format!(r"^{abbr}(\d+):(\d+)\s+(.+)$"))?),
            (
                PatternKind::Spaced,
                Regex::new(&format!(r"^{abbr}\s*(\d+)\s*:\s*(\d+)\s+(.+)$"))?,
            ),
            (
                PatternKind::Tagged,
                Regex::new(&format!(r"<{abbr}\s*(\d+)\s*:\s*(\d+)>\s*(.+)$"))?,
            ),
            (
                PatternKind::ChapterWord,
                Regex::new(&format!(r"{abbr}\s*(\d+)\s*장\s*(\d+)\s*절\s+(.+)$"))?,
            ),
            (PatternKind::Bare, Regex::new(r"(\d+)\s*:\s*(\d+)\s+(.+)$")?),
            (PatternKind::ConcatenatedDigits, Regex::new(r"^(\d+)(\d{2})\s+(.+)$")?),
        ];
        Ok(Self { matchers })
    }

    /// Compile the chapter-discovery variant: the same family minus the
    /// concatenated-digit fallback, with no content group required.
    fn for_chapters(short_name: &str) -> Result<Self, regex::Error> {
        let abbr = regex::escape(short_name);
        let matchers = vec![
            (PatternKind::Exact, Regex::new(&format!(r"^{abbr}(\d+):(\d+)"))?),
            (
                PatternKind::Spaced,
                Regex::new(&format!(r"^{abbr}\s*(\d+)\s*:\s*(\d+)"))?,
            ),
            (
                PatternKind::Tagged,
                Regex::new(&format!(r"<{abbr}\s*(\d+)\s*:\s*(\d+)>"))?,
            ),
            (
                PatternKind::ChapterWord,
                Regex::new(&format!(r"{abbr}\s*(\d+)\s*장\s*(\d+)\s*절"))?,
            ),
            (PatternKind::Bare, Regex::new(r"(\d+)\s*:\s*(\d+)\s+")?),
        ];
        Ok(Self { matchers })
    }

    /// Try every pattern in priority order and return the first whose numbers
    /// validate as positive integers. A pattern whose captures fail
    /// validation does not consume the line; later patterns still get a try.
    fn match_line(&self, line: &str) -> Option<LineMatch> {
        for (kind, regex) in &self.matchers {
            let Some(caps) = regex.captures(line) else {
                continue;
            };

            let (chapter_str, verse_str) = if *kind == PatternKind::ConcatenatedDigits {
                let combined = format!("{}{}", &caps[1], &caps[2]);
                tracing::debug!("ambiguous {} line split as {combined}: {line:?}", kind.label());
                split_concatenated(&combined)
            } else {
                (caps[1].to_string(), caps[2].to_string())
            };

            let Ok(chapter) = chapter_str.parse::<u32>() else {
                continue;
            };
            let Ok(verse) = verse_str.parse::<u32>() else {
                continue;
            };
            if chapter == 0 || verse == 0 {
                continue;
            }

            let content = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();
            return Some(LineMatch { chapter, verse, content });
        }
        None
    }

    /// Chapter-discovery variant of [`Self::match_line`]: only the chapter
    /// number is validated.
    fn match_chapter(&self, line: &str) -> Option<u32> {
        for (_, regex) in &self.matchers {
            let Some(caps) = regex.captures(line) else {
                continue;
            };
            match caps[1].parse::<u32>() {
                Ok(chapter) if chapter > 0 => return Some(chapter),
                _ => {}
            }
        }
        None
    }
}

/// Interpret a run of digits as chapter digits followed by a two-digit verse.
///
/// A three-digit token splits 1+2; longer tokens split at length−2; anything
/// shorter splits after the first digit. The split point is not uniquely
/// determined by length alone (chapter ≥ 10 with a one-digit verse collides
/// with chapter < 10 and a two-digit verse); this reproduces the historical
/// rule rather than resolving the ambiguity.
fn split_concatenated(digits: &str) -> (String, String) {
    if digits.len() >= 3 {
        let split = digits.len() - 2;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let split = 1.min(digits.len());
        (digits[..split].to_string(), digits[split..].to_string())
    }
}

/// Parse raw book text into an ordered list of chapters.
///
/// Lines that match no pattern but carry more than a few characters are folded
/// into the last verse of the chapter most recently matched. Within a chapter
/// the first occurrence of a verse number wins; later repeats are dropped.
/// Verses and chapters come back sorted ascending.
#[must_use]
pub fn parse_book_text(text: &str, book_name: &str) -> Vec<Chapter> {
    let short_name = short_book_name(book_name);
    let patterns = match VerseLinePatterns::for_verses(&short_name) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("could not compile verse patterns for {book_name}: {e}");
            return Vec::new();
        }
    };

    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    tracing::debug!("parsing {book_name}: {} lines", lines.len());

    let mut chapters: BTreeMap<u32, Vec<Verse>> = BTreeMap::new();
    let mut current_chapter: u32 = 1;
    let mut match_count: usize = 0;

    for line in lines {
        if let Some(m) = patterns.match_line(line) {
            current_chapter = m.chapter;
            let verses = chapters.entry(m.chapter).or_default();
            if verses.iter().any(|v| v.verse == m.verse) {
                // First occurrence wins; the repeat is dropped, not folded.
                tracing::debug!("{book_name} {}:{} repeated, dropping line", m.chapter, m.verse);
                continue;
            }
            verses.push(Verse::new(book_name, m.chapter, m.verse, m.content));
            match_count += 1;
        } else if line.chars().count() > CONTINUATION_MIN_CHARS && !chapters.is_empty() {
            // No pattern matched but the line carries text: continuation of
            // the previous verse in the current chapter.
            if let Some(last) = chapters.get_mut(&current_chapter).and_then(|v| v.last_mut()) {
                last.content.push(' ');
                last.content.push_str(line);
            }
        } else if match_count < 5 {
            tracing::debug!("unparsed line in {book_name}: {line:?}");
        }
    }

    tracing::debug!(
        "parsed {book_name}: {match_count} verses across {} chapters",
        chapters.len()
    );

    chapters
        .into_iter()
        .filter_map(|(number, mut verses)| {
            if verses.is_empty() {
                tracing::warn!("{book_name} chapter {number} has no verses");
                return None;
            }
            verses.sort_by_key(|v| v.verse);
            Some(Chapter {
                book: book_name.to_string(),
                chapter: number,
                verses,
                origin: crate::types::ContentOrigin::Source,
            })
        })
        .collect()
}

/// Scan book text for the chapter numbers present, without grouping verses.
///
/// Used by the catalog builder. Returns the ascending, de-duplicated chapter
/// list; empty input or a text with no recognizable lines yields an empty
/// list and the caller decides the fallback.
#[must_use]
pub fn discover_chapters(text: &str, short_name: &str) -> Vec<u32> {
    if text.is_empty() {
        tracing::warn!("no text available for {short_name}, nothing to discover");
        return Vec::new();
    }

    let patterns = match VerseLinePatterns::for_chapters(short_name) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("could not compile chapter patterns for {short_name}: {e}");
            return Vec::new();
        }
    };

    let mut found = std::collections::BTreeSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(chapter) = patterns.match_chapter(line) {
            found.insert(chapter);
        }
    }

    tracing::debug!("{short_name}: discovered {} chapters", found.len());
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const GENESIS_SAMPLE: &str = "창1:1 태초에 하나님이 천지를 창조하시니라\n창1:2 땅이 혼돈하고 공허하며\n창2:1 천지와 만물이 다 이루어지니라\n";

    #[test]
    fn test_parse_basic_sample() {
        let chapters = parse_book_text(GENESIS_SAMPLE, "창세기");
        assert_eq!(chapters.len(), 2);

        assert_eq!(chapters[0].chapter, 1);
        assert_eq!(chapters[0].verses.len(), 2);
        assert_eq!(chapters[0].verses[0].content, "태초에 하나님이 천지를 창조하시니라");
        assert_eq!(chapters[0].verses[1].content, "땅이 혼돈하고 공허하며");

        assert_eq!(chapters[1].chapter, 2);
        assert_eq!(chapters[1].verses.len(), 1);
        assert_eq!(chapters[1].verses[0].verse, 1);
        assert_eq!(chapters[1].verses[0].content, "천지와 만물이 다 이루어지니라");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_book_text(GENESIS_SAMPLE, "창세기");
        let second = parse_book_text(GENESIS_SAMPLE, "창세기");
        assert_eq!(first, second);
    }

    #[test]
    fn test_spaced_form() {
        let chapters = parse_book_text("창 1 : 2 땅이 혼돈하고 공허하며", "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].verses[0].verse, 2);
        assert_eq!(chapters[0].verses[0].content, "땅이 혼돈하고 공허하며");
    }

    #[test]
    fn test_tagged_form() {
        let chapters = parse_book_text("<창 1:3> 하나님이 이르시되 빛이 있으라", "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].verses[0].verse, 3);
        assert_eq!(chapters[0].verses[0].content, "하나님이 이르시되 빛이 있으라");
    }

    #[test]
    fn test_chapter_word_form() {
        let chapters = parse_book_text("창 1장 4절 빛이 하나님이 보시기에 좋았더라", "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter, 1);
        assert_eq!(chapters[0].verses[0].verse, 4);
    }

    #[test]
    fn test_bare_numeric_form() {
        let chapters = parse_book_text("3:1 그런데 뱀은 여호와 하나님이", "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter, 3);
        assert_eq!(chapters[0].verses[0].verse, 1);
    }

    #[test]
    fn test_concatenated_digit_fallback() {
        // Three digits split 1+2; longer tokens keep the last two as the verse.
        let chapters = parse_book_text("101 태초에 하나님이", "창세기");
        assert_eq!(chapters[0].chapter, 1);
        assert_eq!(chapters[0].verses[0].verse, 1);

        let chapters = parse_book_text("11912 주의 말씀은 내 발에 등이요", "시편");
        assert_eq!(chapters[0].chapter, 119);
        assert_eq!(chapters[0].verses[0].verse, 12);
    }

    #[test]
    fn test_pattern_priority_prefixed_beats_bare() {
        // `창1:1 ...` also loosely matches the bare form; the prefixed exact
        // pattern is tried first and must win, keeping chapter 1 (not some
        // other capture alignment).
        let chapters = parse_book_text("창1:1 태초에 하나님이", "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter, 1);
        assert_eq!(chapters[0].verses[0].verse, 1);
        assert_eq!(chapters[0].verses[0].content, "태초에 하나님이");
    }

    #[test]
    fn test_continuation_folding() {
        let text = "창1:1 태초에\n계속되는 내용\n";
        let chapters = parse_book_text(text, "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].verses.len(), 1);
        assert_eq!(chapters[0].verses[0].content, "태초에 계속되는 내용");
    }

    #[test]
    fn test_short_unmatched_line_is_ignored() {
        let text = "창1:1 태초에\n아멘\n";
        let chapters = parse_book_text(text, "창세기");
        assert_eq!(chapters[0].verses[0].content, "태초에");
    }

    #[test]
    fn test_leading_unmatched_line_is_ignored() {
        // Nothing to continue before the first chapter opens.
        let text = "개역한글판 성경전서입니다\n창1:1 태초에 하나님이\n";
        let chapters = parse_book_text(text, "창세기");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].verses[0].content, "태초에 하나님이");
    }

    #[test]
    fn test_duplicate_verse_first_wins() {
        let text = "창1:1 태초에 하나님이\n창1:1 나중에 들어온 중복 구절\n창1:2 땅이 혼돈하고\n";
        let chapters = parse_book_text(text, "창세기");
        assert_eq!(chapters[0].verses.len(), 2);
        assert_eq!(chapters[0].verses[0].content, "태초에 하나님이");
        assert_eq!(chapters[0].verses[1].content, "땅이 혼돈하고");
    }

    #[test]
    fn test_rejects_non_positive_numbers() {
        let chapters = parse_book_text("창0:1 이상한 줄", "창세기");
        assert!(chapters.is_empty());
        let chapters = parse_book_text("창1:0 이상한 줄", "창세기");
        assert!(chapters.is_empty());
    }

    #[test]
    fn test_out_of_order_verses_are_sorted() {
        let text = "창1:3 셋째 구절\n창1:1 첫째 구절\n창1:2 둘째 구절\n";
        let chapters = parse_book_text(text, "창세기");
        let numbers: Vec<u32> = chapters[0].verses.iter().map(|v| v.verse).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_order_chapters_are_sorted() {
        let text = "창3:1 셋째 장\n창1:1 첫째 장\n창2:1 둘째 장\n";
        let chapters = parse_book_text(text, "창세기");
        let numbers: Vec<u32> = chapters.iter().map(|c| c.chapter).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_verse_uniqueness_and_sort_invariants() {
        let text = "창2:2 둘\n창1:2 둘\n창1:1 하나\n창2:1 하나\n창1:2 중복\n";
        for chapter in parse_book_text(text, "창세기") {
            let mut seen = std::collections::HashSet::new();
            let mut previous = 0;
            for verse in &chapter.verses {
                assert!(seen.insert(verse.verse), "duplicate verse {}", verse.verse);
                assert!(verse.verse > previous, "verses not strictly ascending");
                previous = verse.verse;
            }
        }
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_book_text("", "창세기").is_empty());
        assert!(parse_book_text("\n\n  \n", "창세기").is_empty());
    }

    #[test]
    fn test_discover_chapters_basic() {
        let chapters = discover_chapters(GENESIS_SAMPLE, "창");
        assert_eq!(chapters, vec![1, 2]);
    }

    #[test]
    fn test_discover_chapters_mixed_forms() {
        let text = "창1:1 태초에\n<창 2:1> 천지와\n창 3장 1절 그런데\n4:1 이것은\n";
        assert_eq!(discover_chapters(text, "창"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_discover_chapters_empty_text() {
        assert!(discover_chapters("", "창").is_empty());
    }

    #[test]
    fn test_discover_chapters_no_match() {
        assert!(discover_chapters("머리말입니다\n그냥 글입니다\n", "창").is_empty());
    }

    #[test]
    fn test_split_concatenated() {
        assert_eq!(split_concatenated("101"), ("1".to_string(), "01".to_string()));
        assert_eq!(split_concatenated("11912"), ("119".to_string(), "12".to_string()));
        assert_eq!(split_concatenated("12"), ("1".to_string(), "2".to_string()));
    }
}
