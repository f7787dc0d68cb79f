//! Dump the titles and sizes of a lyrics archive for inspection.
//!
//! Usage: cargo run --bin dump_archive -- <archive.txt>

use std::path::PathBuf;

use lexiflow::archive::LyricsArchive;

fn main() {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: dump_archive <archive.txt>");
        std::process::exit(2);
    };

    let archive = match LyricsArchive::read_from(&path) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    println!("=== {} ({} songs) ===", path.display(), archive.len());
    for (title, text) in archive.iter() {
        println!("  {:>7} chars | {}", text.chars().count(), title);
    }
}
