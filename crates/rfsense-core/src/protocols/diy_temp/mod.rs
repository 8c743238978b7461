//! DIY Temperature Array Sensor decoding.
//!
//! The sensor sends `aaaa` preamble and a `dead` sync word in the clear,
//! followed by a 13-byte payload Manchester coded with inverted polarity:
//! device id, four temperatures and a battery voltage as signed big-endian
//! hundredths, then a CRC16/CCITT that is only checked on request.
//!
//! Offsets live in `layout`, byte access and scaling in `reader`, the stage
//! by stage decode in `parser`. `encoder` builds captures for fixtures.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use encoder::{PayloadFields, encode_frame};
pub use parser::{SensorReading, decode_diy_temp};
