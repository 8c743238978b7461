use std::collections::HashMap;

use crate::{DecodeError, FailureSummary};

/// Failure lines kept per kind in the report.
const MAX_EXAMPLE_LINES: usize = 3;

#[derive(Debug, Default, Clone)]
pub(crate) struct FailureStats {
    pub count: u64,
    pub lines: Vec<usize>,
}

pub(crate) fn add_failure(
    stats: &mut HashMap<&'static str, FailureStats>,
    error: &DecodeError,
    line: usize,
) {
    let entry = stats.entry(error.kind()).or_default();
    entry.count += 1;
    if entry.lines.len() < MAX_EXAMPLE_LINES {
        entry.lines.push(line);
    }
}

pub(crate) fn build_failure_summaries(
    stats: HashMap<&'static str, FailureStats>,
) -> Vec<FailureSummary> {
    let mut failures: Vec<FailureSummary> = stats
        .into_iter()
        .map(|(kind, stats)| FailureSummary {
            kind: kind.to_string(),
            count: stats.count,
            lines: stats.lines,
        })
        .collect();

    failures.sort_by(|a, b| a.kind.cmp(&b.kind));
    failures
}
