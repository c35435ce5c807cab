//! Median-filter smoothing

use crate::contour::PitchContour;
use crate::error::MatchError;
use crate::preprocessing::outlier::median;

/// Smooth a contour with an odd-order sliding median filter
///
/// For each frame, the output is the median over a window of `order` frames
/// centered on it. Window indices past either end are clamped to the edge
/// frame (edge replication), so contours shorter than the window still
/// produce sensible output instead of being dragged toward zero by padding.
/// An all-zero contour passes through unchanged.
///
/// # Errors
///
/// Returns `InvalidInput` if `order` is zero or even.
pub fn median_smooth(contour: &[f32], order: usize) -> Result<PitchContour, MatchError> {
    if order == 0 || order % 2 == 0 {
        return Err(MatchError::InvalidInput(format!(
            "Median filter order must be odd, got {}",
            order
        )));
    }

    if contour.is_empty() {
        return Ok(Vec::new());
    }

    let half = order / 2;
    let len = contour.len() as isize;
    let mut out = Vec::with_capacity(contour.len());
    let mut window = Vec::with_capacity(order);

    for i in 0..len {
        window.clear();
        for offset in -(half as isize)..=(half as isize) {
            let j = (i + offset).clamp(0, len - 1);
            window.push(contour[j as usize]);
        }
        out.push(median(&window));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_suppresses_spike() {
        let out = median_smooth(&[60.0, 60.0, 80.0, 60.0, 60.0], 3).unwrap();
        assert_eq!(out, vec![60.0, 60.0, 60.0, 60.0, 60.0]);
    }

    #[test]
    fn test_smooth_constant_unchanged() {
        let out = median_smooth(&[62.0; 20], 9).unwrap();
        assert_eq!(out, vec![62.0; 20]);
    }

    #[test]
    fn test_smooth_shorter_than_window() {
        // Edge replication keeps short contours meaningful
        let out = median_smooth(&[60.0, 61.0, 62.0], 9).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|&v| (60.0..=62.0).contains(&v)));
    }

    #[test]
    fn test_smooth_all_zero_unchanged() {
        let out = median_smooth(&[0.0; 12], 9).unwrap();
        assert_eq!(out, vec![0.0; 12]);
    }

    #[test]
    fn test_smooth_empty() {
        assert!(median_smooth(&[], 9).unwrap().is_empty());
    }

    #[test]
    fn test_smooth_rejects_even_order() {
        assert!(median_smooth(&[60.0], 4).is_err());
        assert!(median_smooth(&[60.0], 0).is_err());
    }
}
