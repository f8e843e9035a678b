//! gem_report - Print the aura, curse, mine and link effects of a build

use clap::Parser;
use gem_core::prelude::*;
use gem_core::ConfigError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Report the effects of aura, curse, mine and link gems")]
struct Cli {
    /// Build description (TOML)
    build: PathBuf,

    /// Reference data directory; the bundled set is used when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Only print one category (aura, curse, mine or link)
    #[arg(short, long)]
    category: Option<OutputCategory>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum ReportError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let reference = match &cli.data {
        Some(dir) => ReferenceData::load_dir(dir)?,
        None => ReferenceData::bundled()?,
    };
    let build = load_build(&cli.build)?;
    tracing::info!(
        build = %cli.build.display(),
        items = build.items.len(),
        "Analyzing build"
    );

    let mut report = analyze_build(&reference, &build)?;
    if let Some(category) = cli.category {
        report.retain_category(category);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    if let Some(summary) = warning_summary(&report) {
        eprintln!("{}", summary);
    }
    Ok(())
}

/// Tell the user the report is partial when curse lines went untranslated
fn warning_summary(report: &BuildReport) -> Option<String> {
    match report.warnings.len() {
        0 => None,
        1 => Some("warning: 1 curse line could not be translated".to_string()),
        n => Some(format!("warning: {} curse lines could not be translated", n)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
