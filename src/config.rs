//! Configuration parameters for query matching

/// Query matching configuration parameters
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Frame rate of pitch contours in Hz (default: 31.25)
    ///
    /// Both queries and templates must be sampled at this rate; alignment
    /// costs computed at different frame rates are not comparable.
    pub frame_rate: f32,

    // Preprocessing
    /// Outlier rejection threshold T1 in semitones (default: 24.0)
    /// Voiced frames farther than this from the voiced median are dropped
    pub outlier_threshold: f32,

    /// Jump limiting threshold T2 in semitones (default: 14.0)
    /// Adjacent voiced frames differing by more than this are rejected
    pub jump_threshold: f32,

    /// Median filter order for smoothing, must be odd (default: 9)
    pub median_filter_order: usize,

    // Tune following
    /// Enable adaptive drift tracking after key alignment (default: false)
    pub tune_following: bool,

    /// Adaptation speed of the drift tracker, in [0, 1] (default: 0.5)
    /// 0 leaves the query untouched, 1 snaps it onto the template
    pub tune_alpha: f32,

    // Scoring
    /// Sakoe-Chiba band radius as a fraction of the longer sequence
    /// (default: Some(0.1)). None disables banding entirely.
    ///
    /// Costs computed with different band parameters are not comparable.
    pub band_radius: Option<f32>,

    // Ranking
    /// Number of candidates to return (default: 10, 1 = single best)
    pub top_k: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            frame_rate: 31.25,
            outlier_threshold: 24.0,
            jump_threshold: 14.0,
            median_filter_order: 9,
            tune_following: false,
            tune_alpha: 0.5,
            band_radius: Some(0.1),
            top_k: 10,
        }
    }
}
