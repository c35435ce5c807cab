//! Silence trimming

use crate::contour::{is_voiced, PitchContour};

/// Trim leading and trailing unvoiced frames from a contour
///
/// Locates the first and last voiced frame and returns the inclusive slice
/// between them as a new contour. A contour with no voiced frames at all is
/// returned unchanged; callers must treat such a contour as unmatchable.
pub fn trim_silence(contour: &[f32]) -> PitchContour {
    let first = contour.iter().position(|&v| is_voiced(v));
    let last = contour.iter().rposition(|&v| is_voiced(v));

    match (first, last) {
        (Some(first), Some(last)) => contour[first..=last].to_vec(),
        _ => contour.to_vec(),
    }
}
