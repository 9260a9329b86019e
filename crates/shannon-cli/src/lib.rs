//! shannon-cli - Command-line interface for shannon
//!
//! Resolves a file path (argument or OS file dialog), runs a full scan or a
//! sparse sample through [`shannon_core::EntropyEstimator`], and prints either
//! the entropy ratio, a randomness verdict, or a JSON report.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use shannon_core::config::Config;
use shannon_core::{
    parse_number, AcquisitionMode, EntropyEstimator, EntropyReport, ProgressReporter,
};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod picker;

/// shannon - Calculate the entropy of a file
#[derive(Parser, Debug)]
#[command(name = "shannon")]
#[command(author, version, about = "Calculate the entropy of a file", long_about = None)]
pub struct Cli {
    /// Path to the file to calculate entropy of
    pub path: Option<PathBuf>,

    /// Use the OS file picker (any path supplied is ignored)
    #[arg(short, long)]
    pub picker: bool,

    /// Number of samples to gather (supports k, m, b or g, t suffixes)
    #[arg(short, long, value_name = "SAMPLES")]
    pub sparse: Option<String>,

    /// Indicate if data is close enough to random to be considered random data
    /// (likely raw encrypted data)
    #[arg(short = 'r', long)]
    pub is_random_data: bool,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "is_random_data")]
    pub json: bool,

    /// Configuration file [default: <config dir>/shannon/config.toml]
    #[arg(long, value_name = "FILE", env = "SHANNON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress log output and progress bars
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Clap command for the given binary name
pub fn command(bin_name: &'static str) -> clap::Command {
    Cli::command().name(bin_name).bin_name(bin_name)
}

fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(verbose)))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse arguments, run, and exit the process.
///
/// `force_verdict` makes the randomness verdict the output regardless of
/// `--is-random-data`.
pub fn main_entry(bin_name: &'static str, force_verdict: bool) -> ! {
    let matches = command(bin_name).get_matches();
    let mut cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    if let Err(e) = check_output_mode(&cli, bin_name, force_verdict) {
        e.exit();
    }
    cli.is_random_data |= force_verdict;

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli, bin_name) {
        Ok(()) => process::exit(0),
        Err(e) => {
            report_error(&e, bin_name);
            process::exit(map_error_to_exit_code(&e));
        }
    }
}

/// A verdict-only binary has no other output format to offer
fn check_output_mode(
    cli: &Cli,
    bin_name: &'static str,
    force_verdict: bool,
) -> std::result::Result<(), clap::Error> {
    if force_verdict && cli.json {
        return Err(command(bin_name).error(
            ErrorKind::ArgumentConflict,
            format!("--json cannot be used with {bin_name}, which always prints the verdict"),
        ));
    }
    Ok(())
}

/// Resolve configuration, acquire the file and print the result
pub fn run(cli: &Cli, bin_name: &'static str) -> Result<()> {
    let config = load_config(cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let path = if cli.picker {
        match picker::pick_file()? {
            Some(path) => path,
            None => {
                info!("No file selected");
                return Ok(());
            }
        }
    } else if let Some(path) = &cli.path {
        path.clone()
    } else {
        command(bin_name).print_help()?;
        return Ok(());
    };

    let mode = match &cli.sparse {
        Some(samples) => AcquisitionMode::Sparse {
            samples: parse_number(samples)?,
        },
        None => AcquisitionMode::Full,
    };
    debug!("Acquisition: {:?}, block size {}", mode, config.scan.block_size);

    let show_progress = config.output.progress && !cli.no_progress && !cli.quiet;
    let mut progress = ProgressReporter::new(show_progress);
    let mut estimator = EntropyEstimator::with_block_size(config.scan.block_size);
    estimator
        .estimate(&path, mode, &mut progress)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let report = EntropyReport::from_estimator(&path, mode, &estimator);
    info!(
        "Read {} bytes from {} ({} distinct values), entropy {:.5}",
        report.bytes_observed,
        path.display(),
        report.distinct_bytes,
        report.entropy
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.is_random_data {
        println!("{}", report.verdict);
    } else {
        println!("File entropy is: {}", report.ratio());
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Print a failure. Problems with the file or the sample count are followed
/// by usage help.
fn report_error(err: &anyhow::Error, bin_name: &'static str) {
    match err.downcast_ref::<shannon_core::Error>() {
        Some(core_err) if core_err.is_validation() => eprintln!("{}", core_err),
        _ => eprintln!("Error: {:#}", err),
    }

    if matches!(map_error_to_exit_code(err), 0 | 2) {
        eprintln!("{}", command(bin_name).render_help());
    }
}

fn is_config_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.to_string().starts_with("Failed to load configuration"))
}

/// Map errors to exit codes:
/// - 0: Success, or invalid sample count (help is printed)
/// - 1: General error
/// - 2: IO error
/// - 3: Configuration error
pub fn map_error_to_exit_code(err: &anyhow::Error) -> i32 {
    if is_config_failure(err) {
        return 3;
    }

    match err.downcast_ref::<shannon_core::Error>() {
        Some(shannon_core::Error::InvalidNumberFormat(_))
        | Some(shannon_core::Error::ZeroSamples)
        | Some(shannon_core::Error::SampleSizeTooLarge { .. }) => 0,
        Some(shannon_core::Error::Io(_)) => 2,
        Some(shannon_core::Error::Config(_)) => 3,
        None if err.is::<std::io::Error>() => 2,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["shannon", "-r", "-s", "10k", "data.bin"]).unwrap();
        assert!(cli.is_random_data);
        assert_eq!(cli.sparse.as_deref(), Some("10k"));
        assert_eq!(cli.path, Some(PathBuf::from("data.bin")));
        assert!(!cli.picker);
    }

    #[test]
    fn test_json_conflicts_with_verdict() {
        assert!(Cli::try_parse_from(["shannon", "--json", "-r", "data.bin"]).is_err());
    }

    #[test]
    fn test_verdict_only_rejects_json() {
        let cli = Cli::try_parse_from(["is-random", "--json", "data.bin"]).unwrap();
        let err = check_output_mode(&cli, "is-random", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert!(err.to_string().contains("--json"));

        assert!(check_output_mode(&cli, "shannon", false).is_ok());
        let plain = Cli::try_parse_from(["is-random", "data.bin"]).unwrap();
        assert!(check_output_mode(&plain, "is-random", true).is_ok());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(false), "info");
        assert_eq!(log_level(true), "debug");
    }

    #[test]
    fn test_exit_codes() {
        let validation: anyhow::Error = shannon_core::Error::ZeroSamples.into();
        assert_eq!(map_error_to_exit_code(&validation), 0);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let wrapped =
            anyhow::Error::from(shannon_core::Error::from(io)).context("Failed to read x");
        assert_eq!(map_error_to_exit_code(&wrapped), 2);

        let config: anyhow::Error = shannon_core::Error::Config("bad".into()).into();
        assert_eq!(map_error_to_exit_code(&config), 3);

        assert_eq!(map_error_to_exit_code(&anyhow::anyhow!("other")), 1);
    }
}
