use thiserror::Error;

use crate::token::{TokenKind, TokenizationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown alignment mode '{0}'. Expected 'global' or 'local'.")]
    UnknownAlignmentMode(String),

    #[error("The gap penalty must be a finite number, but was {0}.")]
    NonFiniteGapPenalty(f64),

    #[error(
        "The similarity of reference element {reference_index} and query element {query_index} is not finite: {value}."
    )]
    InvalidScore {
        reference_index: usize,
        query_index: usize,
        value: f64,
    },

    #[error(
        "The score at reference index {reference_index} and query index {query_index} exceeds the finite range."
    )]
    ScoreOverflow {
        reference_index: usize,
        query_index: usize,
    },

    #[error(transparent)]
    Tokenization(#[from] TokenizationError),

    #[error("The glyph table has no entry for token kind {0}.")]
    MissingGlyph(TokenKind),

    #[error("'{0}' is not a valid glyph. Expected a single character or 'fallback'.")]
    InvalidGlyph(String),
}

impl Error {
    /// Returns true if this error was caused by an invalid alignment configuration.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlignmentMode(_) | Self::NonFiniteGapPenalty(_)
        )
    }
}
