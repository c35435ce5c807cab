//! Unvoiced gap filling

use crate::contour::{is_voiced, PitchContour, UNVOICED};

/// Forward-fill unvoiced frames from the most recent voiced frame
///
/// Each sentinel frame takes the value of the last voiced frame seen before
/// it. Leading sentinels before the first voiced frame are left as-is, so a
/// trimmed contour comes out with no interior gaps while an untrimmed one
/// keeps its silent lead-in.
pub fn fill_unvoiced(contour: &[f32]) -> PitchContour {
    let mut out = contour.to_vec();
    let mut last_voiced = UNVOICED;

    for v in out.iter_mut() {
        if is_voiced(*v) {
            last_voiced = *v;
        } else if is_voiced(last_voiced) {
            *v = last_voiced;
        }
    }

    out
}
