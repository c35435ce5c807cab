//! Adaptive drift tracking ("tune following")
//!
//! Key alignment removes the gross offset between query and template, but a
//! singer's pitch also drifts locally over the course of a phrase. This stage
//! tracks that residual drift with a single-pole exponential filter over the
//! per-frame error and adds the running correction back onto the query.

use crate::contour::PitchContour;
use crate::error::MatchError;

/// Track residual pitch drift between a query and a template
///
/// Both sequences are truncated to the shorter of the two lengths. The
/// per-frame error is `e[i] = template[i] - query[i]` and the correction is
/// the forward recurrence
///
/// ```text
/// corr[0] = alpha * e[0]
/// corr[i] = alpha * e[i] + (1 - alpha) * corr[i-1]
/// ```
///
/// evaluated iteratively from index 0 upward. The recurrence is strictly
/// sequential, so a recursive formulation unwinding from the last index
/// would compute the same values but with recursion depth equal to the
/// sequence length; the loop avoids that stack risk on long queries.
///
/// The output is `query[i] + corr[i]` over the overlap. At `alpha = 0` the
/// query comes back unchanged; at `alpha = 1` the output equals the template.
///
/// # Errors
///
/// Returns `InvalidInput` if either sequence is empty or `alpha` is outside
/// `[0, 1]`.
pub fn follow_tune(query: &[f32], template: &[f32], alpha: f32) -> Result<PitchContour, MatchError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(MatchError::InvalidInput(format!(
            "Tune-following alpha must be in [0, 1], got {}",
            alpha
        )));
    }
    if query.is_empty() || template.is_empty() {
        return Err(MatchError::InvalidInput(
            "Tune following requires non-empty query and template".to_string(),
        ));
    }

    let len = query.len().min(template.len());

    log::debug!(
        "Following tune over {} frames (alpha={}, query {} frames, template {} frames)",
        len,
        alpha,
        query.len(),
        template.len()
    );

    let mut out = Vec::with_capacity(len);
    let mut corr = 0.0f32;

    for i in 0..len {
        let error = template[i] - query[i];
        corr = if i == 0 {
            alpha * error
        } else {
            alpha * error + (1.0 - alpha) * corr
        };
        out.push(query[i] + corr);
    }

    Ok(out)
}
