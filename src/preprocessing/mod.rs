//! Query contour preprocessing
//!
//! Cleans a raw pitch contour before alignment and scoring. The pipeline
//! runs in a fixed order:
//!
//! 1. Trim leading/trailing silence
//! 2. Reject outliers against the voiced median
//! 3. Reject large frame-to-frame jumps
//! 4. Forward-fill the unvoiced gaps the rejections leave behind
//! 5. Median-filter smoothing
//!
//! Every stage returns a new contour; the caller's input is never mutated.

pub mod fill;
pub mod outlier;
pub mod smoothing;
pub mod trim;

use crate::contour::PitchContour;
use crate::error::MatchError;

/// Run the full preprocessing pipeline on a raw query contour
///
/// # Arguments
///
/// * `contour` - Raw pitch contour (MIDI note scale, 0 = unvoiced)
/// * `t1` - Outlier rejection threshold in semitones
/// * `t2` - Jump limiting threshold in semitones
/// * `median_order` - Median filter order, must be odd
///
/// # Returns
///
/// The cleaned contour. An input with no voiced frames comes back with its
/// sentinels intact (trimming leaves it unchanged and the later stages are
/// no-ops on it); callers must treat such a contour as unmatchable.
///
/// # Errors
///
/// Returns `InvalidInput` if `median_order` is not odd.
pub fn preprocess_query(
    contour: &[f32],
    t1: f32,
    t2: f32,
    median_order: usize,
) -> Result<PitchContour, MatchError> {
    log::debug!(
        "Preprocessing query: {} frames, T1={}, T2={}, median order {}",
        contour.len(),
        t1,
        t2,
        median_order
    );

    let q = trim::trim_silence(contour);
    let q = outlier::reject_outliers(&q, t1);
    let q = outlier::limit_jumps(&q, t2);
    let q = fill::fill_unvoiced(&q);
    smoothing::median_smooth(&q, median_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::is_voiced;

    #[test]
    fn test_pipeline_stage_order() {
        // Reference scenario: trim, then outlier/jump no-ops, then fill
        let raw = vec![0.0, 0.0, 60.0, 61.0, 60.0, 0.0, 62.0, 62.0, 0.0, 0.0];

        let trimmed = trim::trim_silence(&raw);
        assert_eq!(trimmed, vec![60.0, 61.0, 60.0, 0.0, 62.0, 62.0]);

        let after_outliers = outlier::reject_outliers(&trimmed, 24.0);
        assert_eq!(after_outliers, trimmed);

        let after_jumps = outlier::limit_jumps(&after_outliers, 14.0);
        assert_eq!(after_jumps, trimmed);

        let filled = fill::fill_unvoiced(&after_jumps);
        assert_eq!(filled, vec![60.0, 61.0, 60.0, 60.0, 62.0, 62.0]);
    }

    #[test]
    fn test_preprocess_output_fully_voiced() {
        let raw = vec![0.0, 60.0, 0.0, 61.0, 90.0, 62.0, 0.0];
        let out = preprocess_query(&raw, 24.0, 14.0, 3).unwrap();
        assert!(!out.is_empty());
        assert!(out.iter().all(|&v| is_voiced(v)));
    }

    #[test]
    fn test_preprocess_all_unvoiced_passes_through() {
        let raw = vec![0.0; 16];
        let out = preprocess_query(&raw, 24.0, 14.0, 9).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn test_preprocess_does_not_mutate_input() {
        let raw = vec![0.0, 60.0, 95.0, 61.0, 0.0];
        let copy = raw.clone();
        let _ = preprocess_query(&raw, 24.0, 14.0, 3).unwrap();
        assert_eq!(raw, copy);
    }

    #[test]
    fn test_preprocess_rejects_even_median_order() {
        assert!(preprocess_query(&[60.0, 61.0], 24.0, 14.0, 8).is_err());
    }
}
