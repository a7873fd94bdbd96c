//! Daily verse resolution.
//!
//! A daily-verse entry stores only a verse key and a reflection; the verse
//! text has to be resolved. The corpus snapshot is the source of truth; a
//! small curated table covers the well-known verses when no corpus is loaded,
//! and resolution never fails — worst case the verse is a labelled
//! placeholder.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::community::types::DailyVerseRow;
use crate::corpus::CorpusSnapshot;
use crate::types::{ContentOrigin, DailyVerse, Verse, VerseKey};

lazy_static! {
    /// Curated texts for verses commonly featured as the daily verse.
    static ref WELL_KNOWN_VERSES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert(
            "요한복음-3-16",
            "하나님이 세상을 이처럼 사랑하사 독생자를 주셨으니 이는 그를 믿는 자마다 멸망하지 않고 영생을 얻게 하려 하심이라",
        );
        m.insert("시편-23-1", "여호와는 나의 목자시니 내게 부족함이 없으리로다");
        m.insert("잠언-3-5", "너는 마음을 다하여 여호와를 신뢰하고 네 명철을 의지하지 말라");
        m.insert("빌립보서-4-13", "내게 능력 주시는 자 안에서 내가 모든 것을 할 수 있느니라");
        m.insert(
            "마태복음-11-28",
            "수고하고 무거운 짐 진 자들아 다 내게로 오라 내가 너희를 쉬게 하리라",
        );
        m.insert(
            "이사야-41-10",
            "두려워하지 말라 내가 너와 함께 함이라 놀라지 말라 나는 네 하나님이 됨이라 내가 너를 굳세게 하리라 참으로 너를 도와 주리라 참으로 나의 의로운 오른손으로 너를 붙들리라",
        );
        m.insert(
            "로마서-8-28",
            "우리가 알거니와 하나님을 사랑하는 자 곧 그의 뜻대로 부르심을 입은 자들에게는 모든 것이 합력하여 선을 이루느니라",
        );
        m
    };
}

/// Resolve a verse key to verse content.
///
/// Tries the corpus snapshot first, then the curated table, then a labelled
/// placeholder. Never fails.
#[must_use]
pub fn resolve_verse(snapshot: Option<&CorpusSnapshot>, key: &VerseKey) -> Verse {
    let Some((book, chapter, verse)) = key.parts() else {
        tracing::warn!("malformed verse key {key}");
        return placeholder_verse("알 수 없음", 0, 0);
    };

    if let Some(snapshot) = snapshot {
        if let Ok(parsed) = snapshot.parsed_chapter(book, chapter) {
            if let Some(found) = parsed.verses.into_iter().find(|v| v.verse == verse) {
                return found;
            }
        }
    }

    if let Some(content) = WELL_KNOWN_VERSES.get(key.as_str()) {
        return Verse::new(book, chapter, verse, *content);
    }

    tracing::warn!("could not resolve verse {key}, serving placeholder");
    placeholder_verse(book, chapter, verse)
}

/// Resolve a backend daily-verse row into a full [`DailyVerse`].
#[must_use]
pub fn resolve_daily_verse(snapshot: Option<&CorpusSnapshot>, row: DailyVerseRow) -> DailyVerse {
    let key = VerseKey(row.verse_key);
    let verse = resolve_verse(snapshot, &key);
    DailyVerse {
        id: row.id,
        date: row.date,
        verse_key: key,
        verse,
        reflection: row.reflection,
        theme: row.theme,
    }
}

fn placeholder_verse(book: &str, chapter: u32, verse: u32) -> Verse {
    let mut v = Verse::new(book, chapter, verse, "구절을 불러올 수 없습니다.");
    v.origin = ContentOrigin::Synthesized;
    v
}
