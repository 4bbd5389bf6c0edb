//! Error types for date-time text handling.

use crate::format::DateTimeFormat;

/// Errors produced when interpreting user-typed or host-supplied text.
///
/// Parse failures are never fatal. The field keeps the raw text on screen
/// and leaves the committed value absent until the user corrects it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text contained the long-format marker token but did not match
    /// the configured format exactly.
    #[error("text {input:?} does not match the {format:?} format")]
    StrictMismatch {
        /// The format the text was checked against.
        format: DateTimeFormat,
        /// The offending input text.
        input: String,
    },

    /// The text matched none of the accepted lenient forms.
    #[error("unrecognized date-time text {0:?}")]
    Unrecognized(String),

    /// A machine-format value from the host could not be decoded.
    #[error("invalid canonical value {0:?}")]
    InvalidCanonical(String),
}
