//! # hum-match
//!
//! The matching core of a query-by-humming retrieval engine. Given a noisy
//! pitch contour extracted from a hummed or sung recording, it cleans the
//! contour, removes the gross key offset against each candidate melody,
//! optionally tracks residual pitch drift, scores a banded DTW alignment
//! cost against every template in a melody corpus, and returns the
//! best-matching songs.
//!
//! ## Quick start
//!
//! ```no_run
//! use hum_match::{match_query, MatchConfig};
//! use hum_match::matching::corpus::{Corpus, Template};
//!
//! // Templates come from MIDI files (see `io::load_corpus`), queries from
//! // a pitch tracker. Values are MIDI note numbers, 0 = unvoiced.
//! let corpus = Corpus::from_templates(vec![
//!     Template::new("00001", vec![60.0, 60.0, 62.0, 64.0]),
//! ]);
//! let raw_query = vec![0.0, 65.0, 65.0, 67.0, 69.0, 0.0];
//!
//! let result = match_query(&raw_query, &corpus, &MatchConfig::default())?;
//! println!("Best match: {}", result.best().unwrap().song_key);
//! # Ok::<(), hum_match::MatchError>(())
//! ```
//!
//! ## Architecture
//!
//! The matching pipeline follows this flow:
//!
//! ```text
//! Raw contour → Preprocessing → Key alignment → (Tune following) → DTW scoring → Ranking
//! ```
//!
//! Preprocessing runs once per query; key alignment, optional tune
//! following, and scoring run once per corpus template, in parallel.
//! Every stage returns a new contour and never mutates its input.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod config;
pub mod contour;
pub mod error;
pub mod io;
pub mod matching;
pub mod preprocessing;

// Re-export main types
pub use config::MatchConfig;
pub use contour::PitchContour;
pub use error::MatchError;
pub use matching::result::{MatchCandidate, MatchResult};
pub use matching::{match_query, match_query_with_cancel, rank};
