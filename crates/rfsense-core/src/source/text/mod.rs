//! Text capture source.
//!
//! One capture per line in `BitBuffer` text form (`{N}hex`, rows separated
//! by `/`). Blank lines and `#` comments are skipped; line numbers are kept
//! so failures can be traced back to the input.

pub mod error;
pub mod parser;
pub mod reader;

pub use parser::{TextFileSource, TextSource};
