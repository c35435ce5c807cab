//! Corpus and template types

use crate::contour::PitchContour;
use crate::error::MatchError;

/// One corpus entry: a song's melody template plus display metadata
///
/// Immutable once loaded; the scorer borrows templates and never copies
/// them with intent to mutate.
#[derive(Debug, Clone)]
pub struct Template {
    /// Unique song key (the template filename minus its extension)
    pub key: String,

    /// Frame-rate pitch vector of the song's melody (0 = silence)
    pub contour: PitchContour,

    /// English title, if the song list provides one
    pub english_title: Option<String>,

    /// Chinese title, if the song list provides one
    pub chinese_title: Option<String>,

    /// Number of hummed recordings of this song in the dataset
    pub num_recordings: u32,
}

impl Template {
    /// Create a template with no display metadata
    pub fn new(key: impl Into<String>, contour: PitchContour) -> Self {
        Self {
            key: key.into(),
            contour,
            english_title: None,
            chinese_title: None,
            num_recordings: 0,
        }
    }
}

/// The full collection of reference melody templates available for matching
///
/// Insertion order is preserved and used as the tie-break when two
/// templates score equally against a query.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    templates: Vec<Template>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from pre-loaded templates, preserving their order
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Append a template, keeping insertion order
    pub fn push(&mut self, template: Template) {
        self.templates.push(template);
    }

    /// Look up a template by song key
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no template carries the key.
    pub fn get(&self, key: &str) -> Result<&Template, MatchError> {
        self.templates
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| MatchError::NotFound(format!("No template for song key '{}'", key)))
    }

    /// Iterate templates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Templates in insertion order, as a slice
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the corpus holds no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
