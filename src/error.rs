//! Error types for the melody matching engine

use std::fmt;

/// Errors that can occur during query matching
#[derive(Debug, Clone)]
pub enum MatchError {
    /// Invalid input parameters (empty contour, out-of-range alpha, etc.)
    InvalidInput(String),

    /// A requested song key or template file does not exist
    NotFound(String),

    /// Processing error during matching
    ProcessingError(String),

    /// Numerical error (non-finite cost, unreachable DTW cell, etc.)
    NumericalError(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            MatchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            MatchError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            MatchError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for MatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MatchError::InvalidInput("empty contour".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty contour");

        let err = MatchError::NotFound("song 00001".to_string());
        assert_eq!(err.to_string(), "Not found: song 00001");
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&MatchError::ProcessingError("x".to_string()));
    }
}
