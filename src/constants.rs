//! Application constants.
//!
//! Centralizes the source-file manifest and the pipeline's magic numbers.

/// The fixed, ordered list of corpus source files.
///
/// Naming convention: `<testament-digit>-<two-digit-order><book-name>.txt`,
/// where testament digit `1` is the old testament and `2` the new.
pub const BIBLE_FILES: &[&str] = &[
    "1-01창세기.txt",
    "1-02출애굽기.txt",
    "1-03레위기.txt",
    "1-04민수기.txt",
    "1-05신명기.txt",
    "1-06여호수아.txt",
    "1-07사사기.txt",
    "1-08룻기.txt",
    "1-09사무엘상.txt",
    "1-10사무엘하.txt",
    "1-11열왕기상.txt",
    "1-12열왕기하.txt",
    "1-13역대상.txt",
    "1-14역대하.txt",
    "1-15에스라.txt",
    "1-16느헤미야.txt",
    "1-17에스더.txt",
    "1-18욥기.txt",
    "1-19시편.txt",
    "1-20잠언.txt",
    "1-21전도서.txt",
    "1-22아가.txt",
    "1-23이사야.txt",
    "1-24예레미야.txt",
    "1-25예레미야애가.txt",
    "1-26에스겔.txt",
    "1-27다니엘.txt",
    "1-28호세아.txt",
    "1-29요엘.txt",
    "1-30아모스.txt",
    "1-31오바댜.txt",
    "1-32요나.txt",
    "1-33미가.txt",
    "1-34나훔.txt",
    "1-35하박국.txt",
    "1-36스바냐.txt",
    "1-37학개.txt",
    "1-38스가랴.txt",
    "1-39말라기.txt",
    "2-01마태복음.txt",
    "2-02마가복음.txt",
    "2-03누가복음.txt",
    "2-04요한복음.txt",
    "2-05사도행전.txt",
    "2-06로마서.txt",
    "2-07고린도전서.txt",
    "2-08고린도후서.txt",
    "2-09갈라디아서.txt",
    "2-10에베소서.txt",
    "2-11빌립보서.txt",
    "2-12골로새서.txt",
    "2-13데살로니가전서.txt",
    "2-14데살로니가후서.txt",
    "2-15디모데전서.txt",
    "2-16디모데후서.txt",
    "2-17디도서.txt",
    "2-18빌레몬서.txt",
    "2-19히브리서.txt",
    "2-20야고보서.txt",
    "2-21베드로전서.txt",
    "2-22베드로후서.txt",
    "2-23요한일서.txt",
    "2-24요한이서.txt",
    "2-25요한삼서.txt",
    "2-26유다서.txt",
    "2-27요한계시록.txt",
];

/// Path segment between the asset base and the source filenames.
pub const DATA_DIR: &str = "data";

/// Parser constants.
pub mod parser {
    /// Minimum character count for an unmatched line to be folded into the
    /// previous verse as a continuation.
    pub const CONTINUATION_MIN_CHARS: usize = 5;
}

/// Catalog builder constants.
pub mod catalog {
    /// Chapter list substituted when chapter discovery finds nothing, so the
    /// catalog entry stays navigable.
    pub const PLACEHOLDER_CHAPTERS: &[u32] = &[1, 2, 3];
}

/// Virtual-data synthesizer constants.
pub mod synth {
    /// Verses generated per synthesized chapter.
    pub const VERSES_PER_CHAPTER: u32 = 10;

    /// Chapter count for books absent from the known-size table.
    pub const DEFAULT_CHAPTER_COUNT: u32 = 10;
}

/// Search constants.
pub mod search {
    /// Maximum number of book search results to return.
    pub const MAX_SEARCH_RESULTS: usize = 20;
}

/// Backend constants.
pub mod backend {
    /// HTTP request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Poll interval for the comment subscription, in seconds.
    pub const COMMENT_POLL_SECS: u64 = 3;
}
