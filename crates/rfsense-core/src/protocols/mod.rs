//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: bit patterns, byte offsets and constants (source of truth)
//! - `reader`: safe byte access, scaling and checksums
//! - `parser`: stage-by-stage decoding of a capture
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure apart from `tracing` diagnostics; sources and the
//! analysis layer handle file access and aggregation.

pub mod diy_temp;
