use thiserror::Error;

/// Reasons a capture is rejected. None of them is retried.
///
/// # Examples
/// ```
/// use rfsense_core::DecodeError;
///
/// let err = DecodeError::TooManyRows { rows: 3 };
/// assert!(err.to_string().contains("too many rows"));
/// assert_eq!(err.kind(), "too_many_rows");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("too many rows: {rows}")]
    TooManyRows { rows: usize },
    #[error("preamble and sync word not found")]
    SyncNotFound,
    #[error("payload too short: need {needed} raw bits after sync, got {actual}")]
    PayloadTooShort { needed: usize, actual: usize },
    #[error("manchester decode failed: need {needed} bits, got {actual}")]
    ManchesterDecodeFailed { needed: usize, actual: usize },
    #[error("CRC mismatch: received {received:#06x}, computed {computed:#06x}")]
    CrcMismatch { received: u16, computed: u16 },
}

impl DecodeError {
    /// Stable identifier used in report summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::TooManyRows { .. } => "too_many_rows",
            DecodeError::SyncNotFound => "sync_not_found",
            DecodeError::PayloadTooShort { .. } => "payload_too_short",
            DecodeError::ManchesterDecodeFailed { .. } => "manchester_decode_failed",
            DecodeError::CrcMismatch { .. } => "crc_mismatch",
        }
    }
}
