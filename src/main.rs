//! CLI entry point for the HCI experiment rater.
//!
//! Provides one subcommand per pipeline: timed tasks (mean time and accuracy)
//! and questionnaires (mean satisfaction and effort), each printing a summary
//! and optionally exporting JSON, CSV and SVG charts.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hci_rater::analyzers::analyzer::{analyze_questionnaires, analyze_tasks};
use hci_rater::analyzers::types::Summary;
use hci_rater::chart::{Chart, SvgChartSink, questionnaire_charts, render_all, task_charts};
use hci_rater::config::DisplayNames;
use hci_rater::error::SummaryError;
use hci_rater::output::{write_csv, write_json, write_questionnaire_summary, write_task_summary};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "hci_rater")]
#[command(about = "Summarize keyboard/voice/touch experiment CSVs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean task time and accuracy per input method
    Tasks(ReportArgs),
    /// Mean questionnaire satisfaction (q1) and effort (q2) per input method
    Questionnaire(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Directory containing the experiment CSV files
    #[arg(short = 'd', long, default_value = "EksperimentData")]
    data_dir: PathBuf,

    /// JSON object mapping interface keys to display names
    #[arg(long)]
    names: Option<PathBuf>,

    /// Write the full summary as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write one CSV row per input method to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Render SVG charts into this directory
    #[arg(long)]
    charts: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tasks(args) => run_tasks(&args),
        Commands::Questionnaire(args) => run_questionnaire(&args),
    }
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/hci_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("hci_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::INFO.into()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn run_tasks(args: &ReportArgs) -> Result<()> {
    let names = load_names(args)?;
    let summary = analyze_tasks(&args.data_dir).map_err(stopped)?;

    write_task_summary(&mut std::io::stdout().lock(), &summary.groups, &names)?;
    export(args, &summary)?;
    draw_charts(args, &task_charts(&summary.groups, &names))
}

fn run_questionnaire(args: &ReportArgs) -> Result<()> {
    let names = load_names(args)?;
    let summary = analyze_questionnaires(&args.data_dir).map_err(stopped)?;

    write_questionnaire_summary(&mut std::io::stdout().lock(), &summary.groups, &names)?;
    export(args, &summary)?;
    draw_charts(args, &questionnaire_charts(&summary.groups, &names))
}

fn stopped(e: SummaryError) -> anyhow::Error {
    error!(error = %e, "Run stopped");
    e.into()
}

fn load_names(args: &ReportArgs) -> Result<DisplayNames> {
    match &args.names {
        Some(path) => {
            info!(path = %path.display(), "Loading display names");
            DisplayNames::load(path)
        }
        None => Ok(DisplayNames::default()),
    }
}

fn export<A: Serialize>(args: &ReportArgs, summary: &Summary<A>) -> Result<()> {
    if let Some(path) = &args.json {
        write_json(path, summary)?;
    }
    if let Some(path) = &args.export {
        write_csv(path, &summary.groups)?;
    }
    Ok(())
}

fn draw_charts(args: &ReportArgs, charts: &[Chart]) -> Result<()> {
    let Some(dir) = &args.charts else {
        return Ok(());
    };
    let mut sink = SvgChartSink::new(dir)?;
    render_all(&mut sink, charts)?;
    info!(dir = %dir.display(), charts = sink.written().len(), "Charts rendered");
    Ok(())
}
