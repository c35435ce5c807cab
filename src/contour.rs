//! Pitch contour primitives
//!
//! A pitch contour is an ordered sequence of `f32` values on the MIDI note
//! scale, one value per fixed-duration frame. The value `0.0` is a reserved
//! sentinel meaning "unvoiced/silence" and is never a valid pitch. A
//! zero-length contour is a valid terminal state: it cannot be matched.
//!
//! Every transformation stage in this crate takes a contour by reference and
//! returns a new one; caller-owned contours are never mutated in place.

/// Sentinel value marking an unvoiced/silent frame
pub const UNVOICED: f32 = 0.0;

/// A pitch contour: one MIDI-scale pitch value per frame, `0.0` = unvoiced
pub type PitchContour = Vec<f32>;

/// Whether a frame value carries a real pitch (i.e. is not the sentinel)
#[inline]
pub fn is_voiced(value: f32) -> bool {
    value > UNVOICED
}

/// Whether the contour contains at least one voiced frame
pub fn has_voiced(contour: &[f32]) -> bool {
    contour.iter().any(|&v| is_voiced(v))
}

/// Collect the voiced values of a contour, preserving order
pub fn voiced_values(contour: &[f32]) -> Vec<f32> {
    contour.iter().copied().filter(|&v| is_voiced(v)).collect()
}
