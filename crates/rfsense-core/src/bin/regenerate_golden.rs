//! Rewrites `tests/golden/<case>/expected_report.json` from each case's
//! `input.txt`. Pass case names to limit the run; run from the workspace root.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use rfsense_core::{DecoderConfig, analyze_capture_file};

const GOLDEN_ROOT: &str = "tests/golden";

fn main() -> ExitCode {
    let selected: Vec<String> = env::args().skip(1).collect();
    match regenerate(Path::new(GOLDEN_ROOT), &selected) {
        Ok(0) => {
            eprintln!("error: no golden cases matched under {GOLDEN_ROOT}");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn regenerate(root: &Path, selected: &[String]) -> Result<usize, Box<dyn Error>> {
    let mut cases = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
            continue;
        };
        if path.join("input.txt").is_file() && (selected.is_empty() || selected.contains(&name)) {
            cases.push(name);
        }
    }
    cases.sort();

    for case in &cases {
        let dir = root.join(case);
        let report = analyze_capture_file(&dir.join("input.txt"), &DecoderConfig::default())
            .map_err(|err| format!("{case}: {err}"))?;
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        fs::write(dir.join("expected_report.json"), json)?;
        println!(
            "{case}: {} decoded, {} failed",
            report.summary.decoded_total, report.summary.failed_total
        );
    }
    Ok(cases.len())
}
