use thiserror::Error;

/// Errors returned when parsing the text form of a bit buffer.
///
/// # Examples
/// ```
/// use rfsense_core::{BitBuffer, BitBufferError};
///
/// let err = "{8}zz".parse::<BitBuffer>().unwrap_err();
/// assert!(matches!(err, BitBufferError::InvalidHex { .. }));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitBufferError {
    #[error("empty bit row at index {row}")]
    EmptyRow { row: usize },
    #[error("invalid bit length prefix in row {row}: '{value}'")]
    InvalidLength { row: usize, value: String },
    #[error("invalid hex digit '{digit}' in row {row}")]
    InvalidHex { row: usize, digit: char },
    #[error("row {row} declares {declared} bits but only {available} are present")]
    LengthExceedsData {
        row: usize,
        declared: usize,
        available: usize,
    },
}
