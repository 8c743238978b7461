use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use rfsense_core::{BitBuffer, DecodeError, DecoderConfig, DecoderRegistry, DeviceDescriptor};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("RFSENSE_BUILD_COMMIT"),
    ", ",
    env!("RFSENSE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "rfsense")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for DIY Temperature Array Sensor captures (Manchester coded FSK).",
    long_about = None,
    after_help = "Examples:\n  rfsense decode '{240}aaaadead5566...'\n  rfsense file analyse captures.txt -o report.json\n  rfsense -v file analyze captures.txt --stdout --pretty"
)]
struct Cli {
    /// Increase diagnostic output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one capture given as `{N}hex` rows separated by '/'.
    Decode {
        /// Capture in text form, e.g. {240}aaaadead...
        code: String,

        /// Print the reading as JSON instead of key/value lines
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        decoder: DecoderArgs,
    },
    /// Operations on capture files (one capture per line).
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// List the registered device decoders.
    Devices {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FileCommands {
    /// Decode every capture of a file and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(
        after_help = "Examples:\n  rfsense file analyse captures.txt -o report.json\n  rfsense file analyze captures.txt --stdout --pretty"
    )]
    Analyse {
        /// Path to a capture file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any capture could not be decoded
        #[arg(long)]
        strict: bool,

        /// List decode failures after analysis
        #[arg(long)]
        list_failures: bool,

        #[command(flatten)]
        decoder: DecoderArgs,
    },
}

#[derive(Args, Debug)]
struct DecoderArgs {
    /// Decoder configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject payloads whose CRC16/CCITT does not match
    #[arg(long)]
    verify_crc: bool,
}

struct AnalyseOptions {
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_failures: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            code,
            json,
            decoder,
        } => cmd_decode(&code, json, &decoder),
        Commands::File { command } => match command {
            FileCommands::Analyse {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_failures,
                decoder,
            } => cmd_file_analyse(
                input,
                AnalyseOptions {
                    report,
                    stdout,
                    pretty,
                    compact,
                    quiet,
                    strict,
                    list_failures,
                },
                &decoder,
            ),
        },
        Commands::Devices { json } => cmd_devices(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn load_config(args: &DecoderArgs) -> Result<DecoderConfig, CliError> {
    let mut config = match args.config.as_ref() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str::<DecoderConfig>(&text).map_err(|err| {
                CliError::new(
                    format!("invalid config file {}: {}", path.display(), err),
                    Some(r#"expected JSON such as {"verify_crc": true}"#.to_string()),
                )
            })?
        }
        None => DecoderConfig::default(),
    };
    if args.verify_crc {
        config.verify_crc = true;
    }
    debug!(?config, "decoder configuration");
    Ok(config)
}

fn cmd_decode(code: &str, json: bool, args: &DecoderArgs) -> Result<(), CliError> {
    let config = load_config(args)?;
    let bits: BitBuffer = code.trim().parse().map_err(|err| {
        CliError::new(
            format!("invalid capture '{}': {}", code, err),
            Some("write rows as {N}hex separated by '/'".to_string()),
        )
    })?;

    let registry = DecoderRegistry::with_defaults(config);
    let mut rejection = None;
    for attempt in registry.decode(&bits) {
        match attempt.result {
            Ok(reading) => {
                if json {
                    let text = serde_json::to_string(&reading).context("JSON serialization failed")?;
                    println!("{}", text);
                } else {
                    for field in reading.fields() {
                        let label = if field.label.is_empty() {
                            field.key
                        } else {
                            field.label
                        };
                        println!("{:<16}: {}", label, field.value);
                    }
                }
                return Ok(());
            }
            Err(err) => rejection = Some(err),
        }
    }

    match rejection {
        Some(err) => Err(CliError::new(
            format!("capture rejected: {}", err),
            Some(rejection_hint(&err).to_string()),
        )),
        None => Err(CliError::new(
            "no enabled decoder",
            Some("check the decoder registry".to_string()),
        )),
    }
}

fn rejection_hint(err: &DecodeError) -> &'static str {
    match err {
        DecodeError::TooManyRows { .. } => "pass a capture with a single row",
        DecodeError::SyncNotFound => "the capture must contain the aaaadead preamble and sync word",
        DecodeError::PayloadTooShort { .. } => "the capture looks truncated after the sync word",
        DecodeError::ManchesterDecodeFailed { .. } => "the payload is not valid Manchester code",
        DecodeError::CrcMismatch { .. } => "drop --verify-crc to accept unchecked payloads",
    }
}

#[derive(Serialize)]
struct DeviceList<'a> {
    devices: Vec<&'a DeviceDescriptor>,
}

fn cmd_devices(json: bool) -> Result<(), CliError> {
    let registry = DecoderRegistry::with_defaults(DecoderConfig::default());
    let devices: Vec<&DeviceDescriptor> = registry.descriptors().collect();

    if json {
        let text = serde_json::to_string(&DeviceList { devices })
            .context("JSON serialization failed")?;
        println!("{}", text);
        return Ok(());
    }

    for device in devices {
        let state = if device.disabled { "disabled" } else { "enabled" };
        println!(
            "{} [{:?}, short {} us, long {} us, reset {} us, {}]",
            device.name,
            device.modulation,
            device.short_width,
            device.long_width,
            device.reset_limit,
            state
        );
    }
    Ok(())
}

fn cmd_file_analyse(
    input: PathBuf,
    options: AnalyseOptions,
    args: &DecoderArgs,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let config = load_config(args)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if options.stdout {
        None
    } else {
        Some(options.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        let report_dir = match report_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
            _ => fs::canonicalize(".").ok(),
        };
        if let (Some(dir), Some(name)) = (report_dir, report_path.file_name()) {
            if dir.join(name) == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let rep = rfsense_core::analyze_capture_file(&resolved_input, &config)
        .context("capture analysis failed")?;
    let json = serialize_report(&rep, options.pretty, options.compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !options.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if options.list_failures && !options.quiet {
        print_failures(&rep);
    }
    if options.strict && rep.summary.failed_total > 0 {
        return Err(CliError::new(
            format!(
                "{} of {} captures could not be decoded",
                rep.summary.failed_total, rep.summary.captures_total
            ),
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &rfsense_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_failures(rep: &rfsense_core::Report) {
    eprintln!("Decode failures:");
    for failure in &rep.failures {
        let lines = failure
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("  {} ({}) lines: {}", failure.kind, failure.count, lines);
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a text file with one capture per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a text file with one capture per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
