//! Corpus and query I/O
//!
//! External collaborators of the matching core: reading pitch-vector query
//! files, parsing the song-list table, and rendering MIDI templates into
//! frame-rate pitch vectors. The core itself only ever sees plain numeric
//! sequences and lookups produced here.

pub mod midi;
pub mod pv;
pub mod song_list;

use std::path::Path;

use crate::error::MatchError;
use crate::matching::corpus::{Corpus, Template};

/// Load a full corpus from a song list and a directory of MIDI templates
///
/// Reads the song-list table, then renders each listed MIDI file at the
/// given frame rate. Entries whose template cannot be read or parsed are
/// skipped with a warning; a single bad file should not take down the
/// whole corpus. Corpus order follows song-list row order.
///
/// # Errors
///
/// Returns `NotFound` if the song list itself cannot be read.
pub fn load_corpus(
    song_list_path: &Path,
    midi_dir: &Path,
    frame_rate: f32,
) -> Result<Corpus, MatchError> {
    let entries = song_list::load_song_list(song_list_path)?;

    let mut corpus = Corpus::new();
    for entry in entries {
        let midi_path = midi_dir.join(&entry.filename);
        match midi::load_midi_template(&midi_path, frame_rate) {
            Ok(contour) => {
                corpus.push(Template {
                    key: entry.key,
                    contour,
                    english_title: entry.english_title,
                    chinese_title: entry.chinese_title,
                    num_recordings: entry.num_recordings,
                });
            }
            Err(e) => {
                log::warn!("Skipping template '{}': {}", entry.key, e);
            }
        }
    }

    log::debug!("Corpus loaded: {} templates", corpus.len());

    Ok(corpus)
}
