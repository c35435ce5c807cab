//! Pitch-vector (.pv) query files
//!
//! A .pv file carries one numeric pitch value per line, produced by an
//! external pitch tracker at the corpus frame rate. Blank lines and
//! non-numeric lines are skipped silently; they are noise in the dataset,
//! not errors.

use std::fs;
use std::path::Path;

use crate::contour::PitchContour;
use crate::error::MatchError;

/// Parse newline-delimited pitch values into a contour
///
/// Tokens that do not parse as a number are dropped without complaint.
pub fn parse_pv(text: &str) -> PitchContour {
    text.lines()
        .filter_map(|line| line.trim().parse::<f32>().ok())
        .collect()
}

/// Load a query contour from a .pv file
///
/// # Errors
///
/// Returns `NotFound` if the file cannot be read.
pub fn load_pv(path: &Path) -> Result<PitchContour, MatchError> {
    let text = fs::read_to_string(path).map_err(|e| {
        MatchError::NotFound(format!("Cannot read pitch vector '{}': {}", path.display(), e))
    })?;

    let contour = parse_pv(&text);
    log::debug!("Loaded {} frames from '{}'", contour.len(), path.display());

    Ok(contour)
}
