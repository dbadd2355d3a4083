use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postural_sway::analysis::features::FeatureMap;
use postural_sway::analysis::{SessionAnalyzer, SessionParameters, StreamingAnalyzer};
use postural_sway::config::AnalyzerConfig;
use postural_sway::cop::{CopCalculator, PressureSample};
use postural_sway::recording::TrialRecording;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "sway_cli",
    about = "Offline CoP stability analysis for recorded balance trials"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trial through the streaming analyzer, one JSON frame per line
    Stream {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the whole-trial summary parameters
    Summary {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute the CoP of one set of corner pressures
    Cop {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Stream { input, config } => run_stream(&input, config.as_deref()),
        Commands::Summary {
            input,
            config,
            output,
        } => run_summary(&input, config.as_deref(), output),
        Commands::Cop { a, b, c, d, config } => run_cop(a, b, c, d, config.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let config = match path {
        Some(path) => AnalyzerConfig::load_from_file(path),
        None => AnalyzerConfig::default(),
    };
    config.validate().context("validating configuration")?;
    Ok(config)
}

fn run_stream(input: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let recording = TrialRecording::load(input)?;
    let mut analyzer = StreamingAnalyzer::new(config)?;

    let frames = recording
        .replay(&mut analyzer)
        .with_context(|| format!("replaying {}", input.display()))?;

    for frame in frames {
        println!("{}", serde_json::to_string(&frame)?);
    }

    Ok(ExitCode::from(0))
}

fn run_summary(
    input: &Path,
    config_path: Option<&Path>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let recording = TrialRecording::load(input)?;
    let points = recording.to_points(&config)?;

    let parameters = SessionAnalyzer::new(&config.features)
        .calculate_parameters(&points)
        .with_context(|| format!("analysing {}", input.display()))?;

    let report = SummaryReportPayload {
        input: input.display().to_string(),
        sample_count: points.len(),
        parameters,
        features: parameters.to_feature_map(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(ExitCode::from(0))
}

fn run_cop(a: f64, b: f64, c: f64, d: f64, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let (x, y) = CopCalculator::new(config.plate).compute(&PressureSample::new(a, b, c, d));

    println!("{}", serde_json::to_string(&CopPayload { x, y })?);
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct SummaryReportPayload {
    input: String,
    sample_count: usize,
    parameters: SessionParameters,
    features: FeatureMap,
}

#[derive(Serialize)]
struct CopPayload {
    x: f64,
    y: f64,
}
