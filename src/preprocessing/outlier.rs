//! Outlier rejection and jump limiting
//!
//! Both stages reject implausible frames by resetting them to the unvoiced
//! sentinel rather than attempting any correction; the subsequent fill stage
//! patches the holes they leave behind.

use crate::contour::{is_voiced, voiced_values, PitchContour, UNVOICED};

/// Reject voiced frames far from the median voiced pitch
///
/// Computes the median over all voiced frames and resets every voiced frame
/// whose absolute distance from that median exceeds `t1` (in semitones, since
/// values are MIDI note numbers). Unvoiced frames are untouched. A contour
/// with no voiced frames is returned unchanged.
pub fn reject_outliers(contour: &[f32], t1: f32) -> PitchContour {
    let voiced = voiced_values(contour);
    if voiced.is_empty() {
        return contour.to_vec();
    }

    let median_pitch = median(&voiced);

    contour
        .iter()
        .map(|&v| {
            if is_voiced(v) && (v - median_pitch).abs() > t1 {
                UNVOICED
            } else {
                v
            }
        })
        .collect()
}

/// Reject frames that jump too far from their voiced predecessor
///
/// Scans sequentially; wherever frame `i` and frame `i - 1` are both voiced
/// and differ by more than `t2`, frame `i` is reset to the sentinel. The jump
/// is rejected, not corrected.
pub fn limit_jumps(contour: &[f32], t2: f32) -> PitchContour {
    let mut out = contour.to_vec();

    for i in 1..out.len() {
        if is_voiced(out[i]) && is_voiced(out[i - 1]) && (out[i] - out[i - 1]).abs() > t2 {
            out[i] = UNVOICED;
        }
    }

    out
}

/// Median of a non-empty set of values (mean of the two middle values when
/// the count is even)
pub(crate) fn median(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
