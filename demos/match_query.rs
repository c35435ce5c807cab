//! Example: match a hummed query against a MIDI corpus
//!
//! Usage: match_query <songList.txt> <midi-dir> <query.pv>

use std::path::Path;

use hum_match::{io, match_query, MatchConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <songList.txt> <midi-dir> <query.pv>", args[0]);
        std::process::exit(1);
    }

    let config = MatchConfig::default();

    // Load the corpus and the query
    let corpus = io::load_corpus(
        Path::new(&args[1]),
        Path::new(&args[2]),
        config.frame_rate,
    )?;
    let raw_query = io::pv::load_pv(Path::new(&args[3]))?;

    // Match
    let result = match_query(&raw_query, &corpus, &config)?;

    // Print the ranked candidates
    println!("Top {} matches:", result.len());
    for (rank, candidate) in result.iter().enumerate() {
        let template = corpus.get(&candidate.song_key)?;
        let title = template.english_title.as_deref().unwrap_or("(untitled)");
        println!(
            "  {}. {} - {} (cost {:.2})",
            rank + 1,
            candidate.song_key,
            title,
            candidate.cost
        );
    }

    Ok(())
}
