use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DecoderConfig;
use crate::registry::DecoderRegistry;
use crate::source::{CaptureEvent, CaptureSource, SourceError, TextFileSource};
use crate::{CaptureSummary, ReadingRecord, Report, make_stub_report};

mod failures;

use failures::{FailureStats, add_failure, build_failure_summaries};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn analyze_capture_file(path: &Path, config: &DecoderConfig) -> Result<Report, AnalysisError> {
    let input_bytes = path.metadata()?.len();
    let source = TextFileSource::open(path)?;
    analyze_source(path, input_bytes, source, config)
}

/// Decode every capture of `source`; `path` and `input_bytes` only label the
/// report, so in-memory and piped sources work as well as files.
pub fn analyze_source<S: CaptureSource>(
    path: &Path,
    input_bytes: u64,
    mut source: S,
    config: &DecoderConfig,
) -> Result<Report, AnalysisError> {
    let registry = DecoderRegistry::with_defaults(config.clone());
    let mut captures_total = 0u64;
    let mut failed_total = 0u64;
    let mut readings = Vec::new();
    let mut failure_stats: HashMap<&'static str, FailureStats> = HashMap::new();

    while let Some(CaptureEvent { line, bits }) = source.next_capture()? {
        captures_total += 1;
        let mut decoded = false;
        for attempt in registry.decode(&bits) {
            match attempt.result {
                Ok(reading) => {
                    info!(line, device = attempt.device, id = reading.id, "capture decoded");
                    decoded = true;
                    readings.push(ReadingRecord { line, reading });
                }
                Err(err) => {
                    debug!(line, device = attempt.device, error = %err, "capture rejected");
                    add_failure(&mut failure_stats, &err, line);
                }
            }
        }
        if !decoded {
            failed_total += 1;
        }
    }

    if captures_total == 0 {
        warn!(path = %path.display(), "no captures found in input");
    }

    let mut report = make_stub_report(&path.display().to_string(), input_bytes);
    report.summary = CaptureSummary {
        captures_total,
        decoded_total: readings.len() as u64,
        failed_total,
    };
    report.readings = readings;
    report.failures = build_failure_summaries(failure_stats);
    Ok(report)
}
