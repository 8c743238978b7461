use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    for var in ["GITHUB_SHA", "RFSENSE_BUILD_COMMIT"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=build.rs");

    // Release pipelines may pin the commit; local builds ask git.
    let commit = ["RFSENSE_BUILD_COMMIT", "GITHUB_SHA"]
        .iter()
        .find_map(|var| env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .or_else(|| git(&["rev-parse", "HEAD"]))
        .map(|sha| sha.trim().chars().take(7).collect::<String>())
        .unwrap_or_else(|| UNKNOWN.to_owned());
    let date = git(&["show", "-s", "--format=%cs", "HEAD"]).unwrap_or_else(|| UNKNOWN.to_owned());

    println!("cargo:rustc-env=RFSENSE_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=RFSENSE_BUILD_DATE={date}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (output.status.success() && !text.is_empty()).then(|| text.to_owned())
}
