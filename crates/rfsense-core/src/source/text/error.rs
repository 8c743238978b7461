use thiserror::Error;

use crate::bits::BitBufferError;

#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: BitBufferError,
    },
}
