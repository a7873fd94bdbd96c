//! `malsseum` - corpus loader CLI.
//!
//! Loads the configured corpus, prints the catalog, and optionally dumps one
//! chapter:
//!   `malsseum`                 - catalog summary
//!   `malsseum <book> <chapter>` - verses of one chapter

use std::env;

use malsseum::config::Config;
use malsseum::corpus::{AssetSource, CorpusService, DirAssetSource, HttpAssetSource};
use malsseum::error::{Error, Result};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::load()?;
    let source = asset_source(&config)?;
    let service = CorpusService::new(source);

    let snapshot = service.load().await?;

    let args: Vec<String> = env::args().collect();
    if args.len() >= 3 {
        print_chapter(&snapshot, &args[1], &args[2])?;
    } else {
        print_catalog(&snapshot);
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Pick the asset source from config: a local directory wins over a URL.
fn asset_source(config: &Config) -> Result<Box<dyn AssetSource>> {
    if let Some(dir) = &config.data_dir {
        return Ok(Box::new(DirAssetSource::new(dir.clone())));
    }
    if let Some(url) = &config.data_url {
        return Ok(Box::new(HttpAssetSource::new(url.clone())));
    }
    Err(Error::config(
        "No corpus asset source configured",
        "Set BIBLE_DATA_DIR to a local directory or BIBLE_DATA_URL to a base URL",
    ))
}

fn print_catalog(snapshot: &malsseum::corpus::CorpusSnapshot) {
    println!("{:<16} {:<8} {:>6}", "book", "testmt", "chaps");
    for book in snapshot.books() {
        let marker = if snapshot.origin_for(&book.id).is_synthesized() {
            " (placeholder)"
        } else {
            ""
        };
        println!(
            "{:<16} {:<8} {:>6}{marker}",
            book.name,
            book.testament,
            book.chapters.len()
        );
    }
    println!("{} books", snapshot.books().len());
}

fn print_chapter(
    snapshot: &malsseum::corpus::CorpusSnapshot,
    book_id: &str,
    chapter_arg: &str,
) -> Result<()> {
    let number: u32 = chapter_arg
        .parse()
        .map_err(|_| Error::Msg(format!("Invalid chapter number: {chapter_arg}")))?;

    let chapter = snapshot.chapter(book_id, number)?;
    if chapter.origin.is_synthesized() {
        println!("({book_id} {number} - placeholder content)");
    }
    for verse in &chapter.verses {
        println!("{}:{} {}", verse.chapter, verse.verse, verse.content);
    }
    Ok(())
}
