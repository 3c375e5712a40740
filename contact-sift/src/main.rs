use anyhow::{bail, Context};
use clap::Parser;
use extractors::{Pipeline, SuspicionClassifier};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

mod batch;
mod config;
mod inputs;
mod output;

/// Extract email contacts from CSV and vCard files, drop duplicates and set
/// suspicious addresses aside.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV or VCF files, or folders containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Folder for the generated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base name for the outputs of a single input file
    #[arg(long, conflicts_with = "merge_into")]
    output_name: Option<String>,

    /// Deduplicate across all inputs and write one pair of outputs with this base name
    #[arg(long)]
    merge_into: Option<String>,

    /// Keep every address, skipping the suspicious-email checks
    #[arg(long)]
    no_filter: bool,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,
}

fn init_logging(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("contact-sift.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(args: Args) -> anyhow::Result<batch::BatchSummary> {
    let (config, config_path) =
        config::SiftConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = &config_path {
        tracing::info!("Using config file {}", path.display());
    }

    let classifier = if config.classifier.enabled && !args.no_filter {
        Some(SuspicionClassifier::new(config.rules.clone())?)
    } else {
        tracing::info!("Suspicious-email filtering disabled");
        None
    };

    let inputs = inputs::discover_inputs(&args.inputs)?;
    if inputs.is_empty() {
        bail!("No CSV or VCF files to process");
    }
    if args.output_name.is_some() && inputs.len() > 1 {
        bail!("--output-name needs exactly one input file, got {}", inputs.len());
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.output.directory.clone());
    tracing::info!("Output folder: {}", output_dir.display());

    let runner = batch::BatchRunner::new(
        Pipeline::new(classifier),
        config.dedup.name_policy,
        output_dir,
    );

    let summary = match &args.merge_into {
        Some(stem) => runner.run_merged(&inputs, stem),
        None => runner.run_each(&inputs, args.output_name.as_deref()),
    };

    tracing::info!(
        "Processed {} out of {} file(s) successfully.",
        summary.processed,
        summary.total()
    );

    Ok(summary)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_file_path.as_deref());

    match run(args) {
        Ok(summary) if summary.processed > 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_folder_mode() {
        let args = Args::try_parse_from([
            "contact-sift",
            "input_csv",
            "-o",
            "out",
            "--merge-into",
            "everyone",
            "--no-filter",
        ])
        .unwrap();

        assert_eq!(args.inputs, vec![PathBuf::from("input_csv")]);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.merge_into.as_deref(), Some("everyone"));
        assert!(args.no_filter);
    }

    #[test]
    fn test_output_name_conflicts_with_merge() {
        let parsed = Args::try_parse_from([
            "contact-sift",
            "a.csv",
            "--output-name",
            "x",
            "--merge-into",
            "y",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("people.csv");
        let config = dir.path().join("sift.toml");
        let out = dir.path().join("out");
        std::fs::write(
            &input,
            "First Name,Last Name,Email\nJohn,Doe,john@example.com\nJane,Smith,jane.smith@company.com\n",
        )
        .unwrap();
        std::fs::write(&config, "[classifier]\nenabled = true\n").unwrap();

        let args = Args::try_parse_from([
            OsString::from("contact-sift"),
            input.into_os_string(),
            OsString::from("--output-dir"),
            out.clone().into_os_string(),
            OsString::from("--config"),
            config.into_os_string(),
        ])
        .unwrap();

        let summary = run(args).unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(
            std::fs::read_to_string(out.join("people_emails.csv")).unwrap(),
            "First Name,Last Name,Email\nJane,Smith,jane.smith@company.com\nJohn,Doe,john@example.com\n"
        );
    }

    #[test]
    fn test_output_name_needs_single_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sift.toml");
        std::fs::write(&config, "").unwrap();
        for name in ["a.csv", "b.csv"] {
            std::fs::write(dir.path().join(name), "x@example.com\n").unwrap();
        }

        let args = Args::try_parse_from([
            OsString::from("contact-sift"),
            dir.path().as_os_str().to_os_string(),
            OsString::from("--output-name"),
            OsString::from("one"),
            OsString::from("--config"),
            config.into_os_string(),
        ])
        .unwrap();

        assert!(run(args).is_err());
    }
}
