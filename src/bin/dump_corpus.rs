//! Debug tool to decode and parse a raw corpus source file.
//!
//! Usage:
//!   `cargo run --bin dump_corpus -- <file.txt>`
//!   `cargo run --bin dump_corpus -- <file.txt> --json`
//!
//! The filename is used to derive the book name, so pass files named like
//! `1-01창세기.txt`; anything else falls back to the file stem.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::Path;

use anyhow::Context;

use malsseum::bible::encoding::decode_corpus_bytes;
use malsseum::bible::names::{book_name_from_filename, short_book_name};
use malsseum::bible::parser::{discover_chapters, parse_book_text};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <file.txt> [--json]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_corpus_bytes(&bytes, &filename)
        .with_context(|| format!("decoding {}", path.display()))?;

    let book_name = book_name_from_filename(&filename)
        .map(String::from)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        });

    let chapters = parse_book_text(&text, &book_name);

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
        return Ok(());
    }

    println!("book: {book_name} (abbr {})", short_book_name(&book_name));
    println!("lines: {}", text.lines().count());
    println!(
        "discovered chapters: {:?}",
        discover_chapters(&text, &short_book_name(&book_name))
    );
    println!();

    for chapter in &chapters {
        let first = chapter.verses.first().map_or("", |v| v.content.as_str());
        let last = chapter.verses.last().map_or(0, |v| v.verse);
        println!(
            "chapter {:>3}: {:>3} verses (1..{last})  {}",
            chapter.chapter,
            chapter.verses.len(),
            truncate(first, 40),
        );
    }
    println!();
    println!(
        "{} chapters, {} verses total",
        chapters.len(),
        chapters.iter().map(|c| c.verses.len()).sum::<usize>()
    );
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}…")
    }
}
