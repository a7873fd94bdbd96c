//! Book naming facts: canonical names, abbreviations, testament classification.
//!
//! All lookups here are pure; no I/O.

use std::collections::HashMap;
use std::sync::LazyLock;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Testament;

/// Regex matching corpus filenames like `1-01창세기.txt`, capturing the book name.
#[allow(clippy::expect_used)]
static RE_SOURCE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+-\d+(.+)\.txt$").expect("valid regex: RE_SOURCE_FILENAME")
});

lazy_static! {
    /// Full book name → standard 1–2 character abbreviation, for all 66 books.
    static ref BOOK_ABBREVIATIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // Old testament
        m.insert("창세기", "창");
        m.insert("출애굽기", "출");
        m.insert("레위기", "레");
        m.insert("민수기", "민");
        m.insert("신명기", "신");
        m.insert("여호수아", "수");
        m.insert("사사기", "삿");
        m.insert("룻기", "룻");
        m.insert("사무엘상", "삼상");
        m.insert("사무엘하", "삼하");
        m.insert("열왕기상", "왕상");
        m.insert("열왕기하", "왕하");
        m.insert("역대상", "대상");
        m.insert("역대하", "대하");
        m.insert("에스라", "스");
        m.insert("느헤미야", "느");
        m.insert("에스더", "에");
        m.insert("욥기", "욥");
        m.insert("시편", "시");
        m.insert("잠언", "잠");
        m.insert("전도서", "전");
        m.insert("아가", "아");
        m.insert("이사야", "사");
        m.insert("예레미야", "렘");
        m.insert("예레미야애가", "애");
        m.insert("에스겔", "겔");
        m.insert("다니엘", "단");
        m.insert("호세아", "호");
        m.insert("요엘", "욜");
        m.insert("아모스", "암");
        m.insert("오바댜", "옵");
        m.insert("요나", "욘");
        m.insert("미가", "미");
        m.insert("나훔", "나");
        m.insert("하박국", "합");
        m.insert("스바냐", "습");
        m.insert("학개", "학");
        m.insert("스가랴", "슥");
        m.insert("말라기", "말");
        // New testament
        m.insert("마태복음", "마");
        m.insert("마가복음", "막");
        m.insert("누가복음", "눅");
        m.insert("요한복음", "요");
        m.insert("사도행전", "행");
        m.insert("로마서", "롬");
        m.insert("고린도전서", "고전");
        m.insert("고린도후서", "고후");
        m.insert("갈라디아서", "갈");
        m.insert("에베소서", "엡");
        m.insert("빌립보서", "빌");
        m.insert("골로새서", "골");
        m.insert("데살로니가전서", "살전");
        m.insert("데살로니가후서", "살후");
        m.insert("디모데전서", "딤전");
        m.insert("디모데후서", "딤후");
        m.insert("디도서", "딛");
        m.insert("빌레몬서", "몬");
        m.insert("히브리서", "히");
        m.insert("야고보서", "약");
        m.insert("베드로전서", "벧전");
        m.insert("베드로후서", "벧후");
        m.insert("요한일서", "요일");
        m.insert("요한이서", "요이");
        m.insert("요한삼서", "요삼");
        m.insert("유다서", "유");
        m.insert("요한계시록", "계");
        m
    };
}

/// Derive the canonical book name from a source filename.
///
/// Strips the testament/order digits and the extension, e.g.
/// `1-01창세기.txt` → `창세기`. Returns `None` when the filename does not
/// match the corpus naming convention; such files cannot be assigned an
/// identity and are skipped from the catalog.
#[must_use]
pub fn book_name_from_filename(filename: &str) -> Option<&str> {
    RE_SOURCE_FILENAME
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Look up the standard short form of a book name, e.g. `창세기` → `창`.
///
/// Falls back to the first character of the name when the book is absent from
/// the table. That heuristic is not guaranteed correct for names outside the
/// 66-book canon.
#[must_use]
pub fn short_book_name(book_name: &str) -> String {
    BOOK_ABBREVIATIONS.get(book_name).map_or_else(
        || book_name.chars().take(1).collect(),
        |abbr| (*abbr).to_string(),
    )
}

/// Classify a source file's testament from its leading numeral: `1-` is the
/// old testament, anything else the new.
#[must_use]
pub fn testament_from_filename(filename: &str) -> Testament {
    if filename.starts_with("1-") {
        Testament::Old
    } else {
        Testament::New
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_book_name_from_filename() {
        assert_eq!(book_name_from_filename("1-01창세기.txt"), Some("창세기"));
        assert_eq!(book_name_from_filename("2-27요한계시록.txt"), Some("요한계시록"));
        assert_eq!(book_name_from_filename("1-25예레미야애가.txt"), Some("예레미야애가"));
    }

    #[test]
    fn test_book_name_unresolved() {
        assert_eq!(book_name_from_filename("README.md"), None);
        assert_eq!(book_name_from_filename("창세기.txt"), None);
        assert_eq!(book_name_from_filename(""), None);
    }

    #[test]
    fn test_short_book_name_from_table() {
        assert_eq!(short_book_name("창세기"), "창");
        assert_eq!(short_book_name("사무엘상"), "삼상");
        assert_eq!(short_book_name("고린도후서"), "고후");
        assert_eq!(short_book_name("요한계시록"), "계");
    }

    #[test]
    fn test_short_book_name_fallback_first_char() {
        assert_eq!(short_book_name("외경"), "외");
        assert_eq!(short_book_name(""), "");
    }

    #[test]
    fn test_every_corpus_file_resolves() {
        for filename in crate::constants::BIBLE_FILES {
            let name = book_name_from_filename(filename).unwrap();
            // Every canonical book has a table entry; the fallback never fires here.
            assert!(
                BOOK_ABBREVIATIONS.contains_key(name),
                "missing abbreviation for {name}"
            );
        }
    }

    #[test]
    fn test_testament_from_filename() {
        assert_eq!(testament_from_filename("1-01창세기.txt"), Testament::Old);
        assert_eq!(testament_from_filename("2-01마태복음.txt"), Testament::New);
    }
}
