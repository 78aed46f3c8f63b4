use std::path::PathBuf;

use analyzer::{analyze_directory, write_report, BatchConfig, ReportFormat};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Reconstructs moves and captures from Brandubh game logs and reports
/// move trails, capture heatmaps and outcome counts.
#[derive(Parser)]
struct Args {
    /// Directory containing one board-state log per game
    log_dir: PathBuf,

    /// Only read files with this extension
    #[arg(long, default_value = "txt")]
    extension: String,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = BatchConfig {
        extension: args.extension,
        ..BatchConfig::default()
    };
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    info!(log_dir = %args.log_dir.display(), threads = config.threads);

    let summary = analyze_directory(&args.log_dir, &config)?;
    write_report(&summary, args.format, args.output.as_deref())?;

    Ok(())
}

// Logs go to stderr so that the report can be piped
fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
