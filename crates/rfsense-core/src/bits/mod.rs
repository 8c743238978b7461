//! Bit-level capture primitives.
//!
//! `BitBuffer` holds demodulated rows as produced by a pulse slicer, with a
//! text form (`{N}hex`, rows separated by `/`) used by sources, fixtures and
//! the CLI. `manchester` decodes and encodes payload regions.

pub mod buffer;
pub mod error;
pub mod manchester;

pub use buffer::BitBuffer;
pub use error::BitBufferError;
