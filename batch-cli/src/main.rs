use clap::Parser;
use forest_fire_core::{run_batch, BatchConfig, BatchReport, FileOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Forest fire batch simulator
#[derive(Parser, Debug)]
#[command(name = "forest-fire")]
#[command(about = "Simulate fire spread for every forest grid file in a directory", long_about = None)]
struct Args {
    /// Directory containing forest grid files
    #[arg(short, long, default_value = "input")]
    input: PathBuf,

    /// Directory receiving one transition file per input
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Input file extension, matched case-insensitively
    #[arg(short, long, default_value = "txt")]
    extension: String,

    /// Simulate files in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Args> for BatchConfig {
    fn from(args: &Args) -> Self {
        BatchConfig {
            input_dir: args.input.clone(),
            output_dir: args.output.clone(),
            extension: args.extension.clone(),
            parallel: args.parallel,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = BatchConfig::from(&args);
    match run_batch(&config) {
        Ok(report) => {
            print_report(&report);
            if report.succeeded() == 0 {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(1)
        }
    }
}

fn print_report(report: &BatchReport) {
    println!("=== Forest Fire Batch ===\n");
    println!("{:<32} | {:<6} | {:>5} | {:>9}", "Input", "Result", "Steps", "Burnt");
    println!("{:-<32}-|-{:-<6}-|-{:->5}-|-{:->9}", "", "", "", "");

    for outcome in &report.outcomes {
        let input = outcome.input();
        let name = input
            .file_name()
            .unwrap_or(input.as_os_str())
            .to_string_lossy();
        match outcome {
            FileOutcome::Completed { summary, .. } => println!(
                "{:<32} | {:<6} | {:>5} | {:>9}",
                name, "ok", summary.steps, summary.cells_burnt
            ),
            FileOutcome::Failed { error, .. } => {
                println!("{:<32} | {:<6} | {:>5} | {:>9}", name, "failed", "-", "-");
                println!("    {error}");
            }
        }
    }

    println!(
        "\n{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
}
