//! Error type shared by the column and Chinese numeral codecs.

use thiserror::Error;

/// Failures reported by the codecs in [`crate::utils`].
///
/// Every codec is a pure function of its input, so a given input always
/// fails the same way. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A column index below 1 was given to the column-name encoder.
    #[error("invalid column index {0}: column indices start at 1")]
    InvalidIndex(i64),

    /// The column-name decoder got an empty string, a character outside
    /// `A..=Z`, or a name too long to fit in a `u64`.
    #[error("invalid column name {0:?}: expected one or more letters A-Z")]
    InvalidColumnName(String),

    /// A character outside the digit and unit vocabulary was found while
    /// parsing a Chinese numeral. `position` is the 0-based character index.
    #[error("character {character:?} at position {position} is not a Chinese numeral")]
    InvalidCharacter { position: usize, character: char },

    /// An empty string was given to the Chinese numeral parser.
    #[error("empty Chinese numeral")]
    EmptyNumeral,

    /// The value is larger than the unit table (or the integer type) can express.
    #[error("number exceeds the largest magnitude the unit table can express")]
    MagnitudeOverflow,
}

/// A convenience `Result` alias using [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
