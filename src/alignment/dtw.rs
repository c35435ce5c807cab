//! Banded dynamic-time-warping alignment cost
//!
//! Scores how well a cleaned query lines up with a corpus template. The cost
//! is the cumulative absolute pitch difference along the optimal monotonic
//! warping path; the path itself is discarded since only the total matters
//! for ranking. A Sakoe-Chiba-style band keeps the path near the diagonal,
//! bounding compute and rejecting wildly non-monotonic alignments.

use crate::error::MatchError;

/// Compute the banded DTW alignment cost between a query and a template
///
/// The template is first truncated to the query's length. With `N` query
/// frames and `M` template frames after truncation, the cumulative cost
/// matrix over the local cost `c(i, j) = |query[i] - template[j]|` follows
/// the standard recurrence
///
/// ```text
/// D[i, j] = c(i, j) + min(D[i-1, j], D[i, j-1], D[i-1, j-1])
/// ```
///
/// with `D[0, 0] = c(0, 0)` and border cells accumulating along their edge.
/// When `band_radius` is `Some(r)`, cells with
/// `|i * (M / N) - j| > r * max(N, M)` are treated as infinite cost and
/// excluded from the minima; the slope maps query index `i` onto the
/// template axis, so the band always connects `(0, 0)` to the terminal
/// cell. The returned cost is `D[N-1, M-1]`.
///
/// Costs computed with different band parameters or frame rates are not
/// comparable. Swapping the query and template roles changes which sequence
/// is truncated, so the cost is not symmetric under role swap when lengths
/// differ.
///
/// # Errors
///
/// Returns `InvalidInput` if either sequence is empty or `band_radius` is
/// negative; a zero-length sequence is a usage error, never a zero-cost
/// match. Returns `ProcessingError` if the band is too narrow to connect
/// the start cell to the terminal cell.
pub fn score(query: &[f32], template: &[f32], band_radius: Option<f32>) -> Result<f32, MatchError> {
    if query.is_empty() {
        return Err(MatchError::InvalidInput("Empty query contour".to_string()));
    }
    if template.is_empty() {
        return Err(MatchError::InvalidInput(
            "Empty template contour".to_string(),
        ));
    }
    if let Some(r) = band_radius {
        if r < 0.0 {
            return Err(MatchError::InvalidInput(format!(
                "Band radius must be non-negative, got {}",
                r
            )));
        }
    }

    let template = &template[..template.len().min(query.len())];
    let n = query.len();
    let m = template.len();

    log::debug!(
        "Scoring alignment: {} x {} cells, band radius {:?}",
        n,
        m,
        band_radius
    );

    // Band geometry: the diagonal is j = i * (m / n), query index scaled
    // onto the template axis; the half-width is a fraction of the longer
    // sequence.
    let slope = m as f32 / n as f32;
    let half_width = band_radius.map(|r| r * n.max(m) as f32);

    let band_bounds = |i: usize| -> (usize, usize) {
        match half_width {
            Some(w) => {
                let center = i as f32 * slope;
                let lo = (center - w).ceil().max(0.0) as usize;
                let hi = ((center + w).floor() as isize).min(m as isize - 1);
                (lo, hi.max(0) as usize)
            }
            None => (0, m - 1),
        }
    };

    // Two-row rolling evaluation; cells outside the band stay infinite.
    let mut prev = vec![f32::INFINITY; m];
    let mut curr = vec![f32::INFINITY; m];

    for (i, &q) in query.iter().enumerate() {
        curr.fill(f32::INFINITY);
        let (lo, hi) = band_bounds(i);
        if lo > hi || lo >= m {
            return Err(MatchError::ProcessingError(format!(
                "Band leaves row {} empty ({} x {} cells)",
                i, n, m
            )));
        }

        for j in lo..=hi {
            let cost = (q - template[j]).abs();
            let best = if i == 0 && j == 0 {
                0.0
            } else {
                let up = if i > 0 { prev[j] } else { f32::INFINITY };
                let left = if j > 0 { curr[j - 1] } else { f32::INFINITY };
                let diag = if i > 0 && j > 0 { prev[j - 1] } else { f32::INFINITY };
                up.min(left).min(diag)
            };
            curr[j] = cost + best;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    let total = prev[m - 1];
    if !total.is_finite() {
        return Err(MatchError::ProcessingError(format!(
            "Band too narrow to reach terminal cell ({} x {} cells)",
            n, m
        )));
    }

    Ok(total)
}
