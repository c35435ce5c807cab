//! Song-list table parsing
//!
//! The corpus ships a `songList.txt` table with one tab-separated row per
//! song: `filename \t english title \t chinese title \t recording count`.
//! A `-` title means "none". Rows with fewer than four fields or an
//! unparseable count are skipped rather than failing the whole load.

use std::fs;
use std::path::Path;

use crate::error::MatchError;

/// One row of the song-list table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    /// Song key: the template filename minus its `.mid` suffix
    pub key: String,

    /// Template filename as listed (e.g. `00001.mid`)
    pub filename: String,

    /// English title, if listed
    pub english_title: Option<String>,

    /// Chinese title, if listed
    pub chinese_title: Option<String>,

    /// Number of hummed recordings of this song in the dataset
    pub num_recordings: u32,
}

/// Parse song-list text into entries, skipping malformed rows
pub fn parse_song_list(text: &str) -> Vec<SongEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let parts: Vec<&str> = line.trim_end().split('\t').collect();
        if parts.len() < 4 {
            continue;
        }

        let num_recordings = match parts[3].trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("Skipping song-list row with bad recording count: {}", line);
                continue;
            }
        };

        let filename = parts[0].to_string();
        entries.push(SongEntry {
            key: filename.trim_end_matches(".mid").to_string(),
            filename,
            english_title: title_field(parts[1]),
            chinese_title: title_field(parts[2]),
            num_recordings,
        });
    }

    entries
}

/// Load and parse a song-list file
///
/// The file's bytes are decoded leniently (the reference dataset uses a
/// legacy encoding for Chinese titles; undecodable bytes are replaced, not
/// fatal).
///
/// # Errors
///
/// Returns `NotFound` if the file cannot be read.
pub fn load_song_list(path: &Path) -> Result<Vec<SongEntry>, MatchError> {
    let bytes = fs::read(path).map_err(|e| {
        MatchError::NotFound(format!("Cannot read song list '{}': {}", path.display(), e))
    })?;

    let entries = parse_song_list(&String::from_utf8_lossy(&bytes));
    log::debug!("Loaded {} songs from '{}'", entries.len(), path.display());

    Ok(entries)
}

fn title_field(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() || field == "-" {
        None
    } else {
        Some(field.to_string())
    }
}
