use thiserror::Error;

/// Errors that can occur while decoding a word sequence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A surrogate, an unassigned reserved word, or a continuation word
    /// with its high bit set.
    #[error("Illegal code unit {word:#06X} at position {position}")]
    IllegalCodeUnit { word: u16, position: usize },

    #[error("Unexpected end of input: a word is required at position {position}")]
    UnexpectedEndOfInput { position: usize },

    #[error("Trailing words: encoded value ends after {consumed} words, got {len}")]
    TrailingWords { consumed: usize, len: usize },
}

impl DecodeError {
    /// Shift reported positions by `base`, for callers that decode out of a
    /// window of a larger buffer.
    pub(crate) fn offset_by(self, base: usize) -> Self {
        match self {
            Self::IllegalCodeUnit { word, position } => Self::IllegalCodeUnit {
                word,
                position: position + base,
            },
            Self::UnexpectedEndOfInput { position } => Self::UnexpectedEndOfInput {
                position: position + base,
            },
            other @ Self::TrailingWords { .. } => other,
        }
    }
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
