//! rfsense core library for decoding DIY Temperature Array Sensor captures.
//!
//! Captures are demodulated bit rows (`bits`). Sources turn text inputs into
//! captures, the registry dispatches them to protocol decoders
//! (layout/reader/parser), and the analysis layer aggregates readings and
//! rejections into a deterministic report. Decoding is bit-oriented and side
//! effect free apart from `tracing` diagnostics; all I/O lives in `source`.
//!
//! Invariants:
//! - A reading is only produced once both payload length checks pass.
//! - A missing sync word is reported as such, never as a bogus offset.
//! - CRC verification is opt-in through `DecoderConfig::verify_crc`.
//!
//! # Examples
//! ```
//! use rfsense_core::{BitBuffer, DecoderConfig, decode_diy_temp};
//! use rfsense_core::protocols::diy_temp::{PayloadFields, encode_frame};
//!
//! let fields = PayloadFields { id: 5, temperatures: [2500, -50, 0, 100], vbatt: 370, crc: 0 };
//! let text = encode_frame(&fields.to_bytes()).to_string();
//!
//! let bits: BitBuffer = text.parse()?;
//! let reading = decode_diy_temp(&bits, &DecoderConfig::default())?;
//! assert_eq!(reading.temperature1_c, 25.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod analysis;
pub mod bits;
mod config;
pub mod protocols;
pub mod registry;
pub mod source;

pub use analysis::{AnalysisError, analyze_capture_file, analyze_source};
pub use bits::{BitBuffer, BitBufferError};
pub use config::DecoderConfig;
pub use protocols::diy_temp::error::DecodeError;
pub use protocols::diy_temp::{SensorReading, decode_diy_temp};
pub use registry::{Decoder, DecoderRegistry, DeviceDescriptor, Modulation};
pub use source::{CaptureEvent, CaptureSource, SourceError, TextFileSource, TextSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Aggregated decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use rfsense_core::make_stub_report;
///
/// let report = make_stub_report("captures.txt", 123);
/// assert_eq!(report.report_version, rfsense_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input file metadata.
    pub input: InputInfo,
    /// Capture counters.
    pub summary: CaptureSummary,
    /// Decoded readings in input order.
    pub readings: Vec<ReadingRecord>,
    /// Rejections grouped by kind, sorted by kind.
    pub failures: Vec<FailureSummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub captures_total: u64,
    pub decoded_total: u64,
    /// Captures no decoder accepted.
    pub failed_total: u64,
}

/// A reading together with the input line it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub line: usize,
    #[serde(flatten)]
    pub reading: SensorReading,
}

/// Rejections of one kind (see `DecodeError::kind`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummary {
    pub kind: String,
    pub count: u64,
    /// At most three input lines that failed this way.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<usize>,
}

/// One key/value pair of a decoded record, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    pub key: &'static str,
    /// Human-readable label; empty for the model.
    pub label: &'static str,
    pub value: FieldValue,
}

impl OutputField {
    pub fn new(key: &'static str, label: &'static str, value: FieldValue) -> Self {
        Self { key, label, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    /// Rendered with two decimals followed by `unit`.
    Double { value: f64, unit: &'static str },
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Double { value, unit } => write!(f, "{value:.2}{unit}"),
        }
    }
}

/// Build a report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use rfsense_core::make_stub_report;
///
/// let report = make_stub_report("captures.txt", 123);
/// assert_eq!(report.input.bytes, 123);
/// assert!(report.readings.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "rfsense".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: CaptureSummary::default(),
        readings: vec![],
        failures: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_empty_failure_lines() {
        let mut report = make_stub_report("captures.txt", 1);
        report.failures = vec![FailureSummary {
            kind: "sync_not_found".to_string(),
            count: 1,
            lines: vec![],
        }];

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value["failures"][0].get("lines").is_none());
        assert_eq!(value["summary"]["captures_total"], 0);
    }

    #[test]
    fn reading_record_flattens_reading() {
        let record = ReadingRecord {
            line: 3,
            reading: SensorReading {
                model: "DYI Temperature Array Sensor".to_string(),
                id: 1,
                temperature1_c: 20.5,
                temperature2_c: 0.0,
                temperature3_c: 0.0,
                temperature4_c: 0.0,
                vbatt: 3.0,
                crc: 0x1234,
            },
        };

        let value = serde_json::to_value(&record).expect("record json");
        assert_eq!(value["line"], 3);
        assert_eq!(value["temperature1_C"], 20.5);
        assert!(value.get("crc").is_none());

        let back: ReadingRecord = serde_json::from_value(value).expect("record back");
        assert_eq!(back.reading.id, 1);
        assert_eq!(back.reading.crc, 0);
    }

    #[test]
    fn field_value_formats_units() {
        let value = FieldValue::Double {
            value: -0.5,
            unit: "C",
        };
        assert_eq!(value.to_string(), "-0.50C");
        assert_eq!(FieldValue::Int(5).to_string(), "5");
    }
}
