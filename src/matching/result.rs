//! Match result types

use serde::{Deserialize, Serialize};

/// One scored (query, template) pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Song key of the template
    pub song_key: String,

    /// Alignment cost; lower is a better match. Costs are only comparable
    /// between candidates scored with the same frame rate and band settings.
    pub cost: f32,
}

/// Ranked outcome of matching one query against a corpus
///
/// Candidates are ordered by ascending cost; ties keep corpus order. Holds
/// at most the `K` best entries. Created fresh per query and discarded
/// after consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Candidates in ascending cost order, length at most K
    pub candidates: Vec<MatchCandidate>,
}

impl MatchResult {
    /// The single best candidate, if any template was scored
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    /// Number of ranked candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no template could be scored
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate candidates in rank order
    pub fn iter(&self) -> impl Iterator<Item = &MatchCandidate> {
        self.candidates.iter()
    }
}
