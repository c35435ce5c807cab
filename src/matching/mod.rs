//! Corpus matching and ranking
//!
//! Ties the alignment stages together: every corpus template is scored
//! against the query independently (the scoring loop is embarrassingly
//! parallel and runs on the rayon pool), the results are collected in
//! corpus order, and the cheapest K candidates are returned.

pub mod corpus;
pub mod result;

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::alignment;
use crate::config::MatchConfig;
use crate::contour::has_voiced;
use crate::error::MatchError;
use crate::matching::corpus::{Corpus, Template};
use crate::matching::result::{MatchCandidate, MatchResult};
use crate::preprocessing::preprocess_query;

/// Rank scored candidates by ascending cost and keep the best `k`
///
/// The sort is stable, so candidates with equal cost keep their corpus
/// iteration order. The input collection is left untouched; a fresh result
/// is returned.
pub fn rank(candidates: &[MatchCandidate], k: usize) -> MatchResult {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    ranked.truncate(k);
    MatchResult { candidates: ranked }
}

/// Match a raw query contour against every template in a corpus
///
/// Composes the full pipeline: preprocessing, per-template key alignment,
/// optional tune following, banded DTW scoring, and ranking. The corpus is
/// passed explicitly; this function holds no state of its own.
///
/// Per-template scoring runs across the rayon worker pool. Results are
/// aggregated in corpus order before ranking so that the stable tie-break
/// is deterministic regardless of scheduling. A template that fails to
/// score (e.g. an empty pitch vector) is skipped with a warning rather
/// than aborting the whole match; one bad template should not block
/// retrieval.
///
/// # Arguments
///
/// * `raw_contour` - Unprocessed query pitch contour (0 = unvoiced)
/// * `corpus` - Reference templates to match against
/// * `config` - Matching parameters (thresholds, tune following, band, K)
///
/// # Returns
///
/// At most `config.top_k` candidates, ascending by cost.
///
/// # Errors
///
/// Returns `InvalidInput` if the query contains no voiced frames at all
/// or the corpus is empty.
pub fn match_query(
    raw_contour: &[f32],
    corpus: &Corpus,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    match_query_with_cancel(raw_contour, corpus, config, None)
}

/// [`match_query`] with a cooperative cancellation flag
///
/// Scoring scales linearly with corpus size and is otherwise blocking, so
/// callers driving large corpora can share an `AtomicBool` and set it to
/// abandon the match. The flag is checked before each template; templates
/// already being scored finish normally.
///
/// # Errors
///
/// In addition to [`match_query`]'s errors, returns `ProcessingError` if
/// the flag was set before all templates were scored.
pub fn match_query_with_cancel(
    raw_contour: &[f32],
    corpus: &Corpus,
    config: &MatchConfig,
    cancel: Option<&AtomicBool>,
) -> Result<MatchResult, MatchError> {
    if corpus.is_empty() {
        return Err(MatchError::InvalidInput("Empty corpus".to_string()));
    }

    let query = preprocess_query(
        raw_contour,
        config.outlier_threshold,
        config.jump_threshold,
        config.median_filter_order,
    )?;

    if query.is_empty() || !has_voiced(&query) {
        return Err(MatchError::InvalidInput(
            "Query has no voiced frames after preprocessing".to_string(),
        ));
    }

    log::debug!(
        "Matching query ({} frames) against {} templates (tuned={}, K={})",
        query.len(),
        corpus.len(),
        config.tune_following,
        config.top_k
    );

    // Independent per-template scoring; collect() preserves corpus order.
    let candidates: Vec<MatchCandidate> = corpus
        .templates()
        .par_iter()
        .filter_map(|template| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return None;
            }
            match score_template(&query, template, config) {
                Ok(cost) => Some(MatchCandidate {
                    song_key: template.key.clone(),
                    cost,
                }),
                Err(e) => {
                    log::warn!("Skipping template '{}': {}", template.key, e);
                    None
                }
            }
        })
        .collect();

    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Err(MatchError::ProcessingError(
            "Match cancelled before all templates were scored".to_string(),
        ));
    }

    if candidates.is_empty() {
        return Err(MatchError::ProcessingError(
            "No template could be scored against the query".to_string(),
        ));
    }

    Ok(rank(&candidates, config.top_k))
}

/// Score the query against one template: key-align, optionally follow the
/// tune, then compute the DTW cost
fn score_template(
    query: &[f32],
    template: &Template,
    config: &MatchConfig,
) -> Result<f32, MatchError> {
    let offset = alignment::estimate_offset(query, &template.contour)?;
    let aligned = alignment::apply_offset(query, offset);

    let aligned = if config.tune_following {
        alignment::follow_tune(&aligned, &template.contour, config.tune_alpha)?
    } else {
        aligned
    };

    alignment::score(&aligned, &template.contour, config.band_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(key: &str, cost: f32) -> MatchCandidate {
        MatchCandidate {
            song_key: key.to_string(),
            cost,
        }
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let result = rank(
            &[candidate("a", 3.0), candidate("b", 1.0), candidate("c", 2.0)],
            10,
        );
        let keys: Vec<&str> = result.iter().map(|c| c.song_key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let result = rank(
            &[candidate("x", 2.0), candidate("y", 1.0), candidate("z", 2.0)],
            10,
        );
        let keys: Vec<&str> = result.iter().map(|c| c.song_key.as_str()).collect();
        assert_eq!(keys, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_rank_truncates_to_k() {
        let candidates = vec![candidate("a", 1.0), candidate("b", 2.0), candidate("c", 3.0)];
        assert_eq!(rank(&candidates, 2).len(), 2);
        assert_eq!(rank(&candidates, 1).best().unwrap().song_key, "a");
        // K larger than the corpus returns everything
        assert_eq!(rank(&candidates, 50).len(), 3);
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let candidates = vec![candidate("a", 2.0), candidate("b", 1.0)];
        let _ = rank(&candidates, 10);
        assert_eq!(candidates[0].song_key, "a");
    }

    fn small_corpus() -> Corpus {
        Corpus::from_templates(vec![
            Template::new("up", vec![60.0, 60.0, 62.0, 62.0, 64.0, 64.0, 65.0, 65.0]),
            Template::new("down", vec![72.0, 72.0, 71.0, 71.0, 69.0, 69.0, 67.0, 67.0]),
            Template::new("flat", vec![55.0; 8]),
        ])
    }

    #[test]
    fn test_match_query_finds_transposed_melody() {
        // The "up" template hummed 4 semitones high, with silent padding
        let mut raw = vec![0.0, 0.0];
        raw.extend([64.0, 64.0, 66.0, 66.0, 68.0, 68.0, 69.0, 69.0]);
        raw.extend([0.0, 0.0]);

        let config = MatchConfig {
            median_filter_order: 3,
            band_radius: None,
            ..MatchConfig::default()
        };
        let result = match_query(&raw, &small_corpus(), &config).unwrap();

        assert_eq!(result.best().unwrap().song_key, "up");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_match_query_respects_top_k() {
        let raw = vec![64.0, 64.0, 66.0, 66.0, 68.0, 68.0];
        let config = MatchConfig {
            median_filter_order: 3,
            band_radius: None,
            top_k: 1,
            ..MatchConfig::default()
        };
        let result = match_query(&raw, &small_corpus(), &config).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_match_query_skips_unscorable_template() {
        let mut corpus = small_corpus();
        corpus.push(Template::new("broken", vec![]));

        let raw = vec![64.0, 64.0, 66.0, 66.0, 68.0, 68.0];
        let config = MatchConfig {
            median_filter_order: 3,
            band_radius: None,
            ..MatchConfig::default()
        };
        let result = match_query(&raw, &corpus, &config).unwrap();

        // The empty template is skipped, not fatal
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|c| c.song_key != "broken"));
    }

    #[test]
    fn test_match_query_unvoiced_query_rejected() {
        let raw = vec![0.0; 32];
        let result = match_query(&raw, &small_corpus(), &MatchConfig::default());
        assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn test_match_query_empty_corpus_rejected() {
        let raw = vec![60.0, 61.0, 62.0];
        let result = match_query(&raw, &Corpus::new(), &MatchConfig::default());
        assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn test_match_query_cancelled_up_front() {
        let raw = vec![64.0, 64.0, 66.0, 66.0, 68.0, 68.0];
        let cancel = AtomicBool::new(true);
        let result = match_query_with_cancel(
            &raw,
            &small_corpus(),
            &MatchConfig::default(),
            Some(&cancel),
        );
        assert!(matches!(result, Err(MatchError::ProcessingError(_))));
    }

    #[test]
    fn test_match_query_with_tune_following() {
        let raw = vec![64.0, 64.0, 66.0, 66.0, 68.0, 68.0, 69.0, 69.0];
        let config = MatchConfig {
            median_filter_order: 3,
            band_radius: None,
            tune_following: true,
            tune_alpha: 0.5,
            ..MatchConfig::default()
        };
        let result = match_query(&raw, &small_corpus(), &config).unwrap();
        assert_eq!(result.best().unwrap().song_key, "up");
    }
}
