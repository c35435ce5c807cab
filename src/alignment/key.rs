//! Key-offset estimation and removal
//!
//! A hummed query is rarely in the template's key. Before scoring, the gross
//! pitch offset between the two is estimated from an early window of each
//! sequence and subtracted from the query.

use crate::contour::PitchContour;
use crate::error::MatchError;

/// Estimate the scalar pitch offset between a query and a template
///
/// Uses the mean of frames 1 and 2 (0-indexed) of each sequence as a proxy
/// for its starting pitch; frame 0 alone is too easily corrupted by onset
/// noise. If either sequence has fewer than 3 frames, both sides fall back
/// to the mean of their first `min(3, len)` frames.
///
/// The returned offset follows the convention `query - template`: subtract
/// it from the query to move the query into the template's key.
///
/// Sentinel (unvoiced) frames are NOT special-cased here; an estimate taken
/// over unvoiced frames is meaningless, so callers should pass preprocessed
/// (trimmed and filled) contours.
///
/// # Errors
///
/// Returns `InvalidInput` if either sequence is empty.
pub fn estimate_offset(query: &[f32], template: &[f32]) -> Result<f32, MatchError> {
    if query.is_empty() {
        return Err(MatchError::InvalidInput(
            "Empty query contour".to_string(),
        ));
    }
    if template.is_empty() {
        return Err(MatchError::InvalidInput(
            "Empty template contour".to_string(),
        ));
    }

    // The fallback is joint: one short sequence switches both sides to the
    // head-mean window.
    let offset = if query.len() < 3 || template.len() < 3 {
        head_mean(query) - head_mean(template)
    } else {
        (query[1] + query[2]) / 2.0 - (template[1] + template[2]) / 2.0
    };

    log::debug!(
        "Estimated key offset {:.2} semitones (query {} frames, template {} frames)",
        offset,
        query.len(),
        template.len()
    );

    Ok(offset)
}

/// Subtract a pitch offset from every frame of a contour
///
/// The offset is applied to sentinel frames too: this function does not
/// special-case zeros, so unvoiced frames come out at `-offset`. Callers that
/// care must re-run trim/fill afterwards. Offset estimation and offset
/// application are deliberately asymmetric in their sentinel handling.
pub fn apply_offset(contour: &[f32], offset: f32) -> PitchContour {
    contour.iter().map(|&v| v - offset).collect()
}

/// Mean of the first `min(3, len)` frames
fn head_mean(contour: &[f32]) -> f32 {
    let n = contour.len().min(3);
    contour[..n].iter().sum::<f32>() / n as f32
}
