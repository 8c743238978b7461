mod text;

pub use text::{TextFileSource, TextSource};

use thiserror::Error;

use crate::bits::BitBuffer;

/// One capture as handed over by the demodulator.
#[derive(Debug, Clone)]
pub struct CaptureEvent {
    /// 1-based position of the capture in its input.
    pub line: usize,
    pub bits: BitBuffer,
}

pub trait CaptureSource {
    fn next_capture(&mut self) -> Result<Option<CaptureEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid capture on line {line}: {message}")]
    Capture { line: usize, message: String },
}

impl From<text::error::TextSourceError> for SourceError {
    fn from(value: text::error::TextSourceError) -> Self {
        match value {
            text::error::TextSourceError::Io(err) => SourceError::Io(err),
            text::error::TextSourceError::Parse { line, source } => SourceError::Capture {
                line,
                message: source.to_string(),
            },
        }
    }
}
