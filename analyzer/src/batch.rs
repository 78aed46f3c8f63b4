use std::path::{Path, PathBuf};
use std::thread;

use brandubh::{AggregateStatistics, GameEvents};
use tracing::{debug, info, trace, warn};

use crate::{discover_logs, error_chain, read_log_file, BatchConfig, Diagnostic};

/// The events of one game log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAnalysis {
    pub events: GameEvents,
    pub skipped_records: usize,
    pub malformed_terminal: bool,
}

/// Statistics over a set of game logs, and how much of the input had to be ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub statistics: AggregateStatistics,
    /// Files that could not be read at all.
    pub failed_files: Vec<PathBuf>,
    pub skipped_records: usize,
    pub malformed_terminals: usize,
}

impl BatchSummary {
    /// Appends `other`, which must cover files that come after ours.
    #[must_use]
    pub fn combine(mut self, other: BatchSummary) -> Self {
        self.statistics = self.statistics.combine(other.statistics);
        self.failed_files.extend(other.failed_files);
        self.skipped_records += other.skipped_records;
        self.malformed_terminals += other.malformed_terminals;
        self
    }

    #[must_use]
    fn record(mut self, path: &Path, analysis: anyhow::Result<FileAnalysis>) -> Self {
        match analysis {
            Ok(analysis) => {
                self.statistics = self.statistics.merge(&analysis.events);
                self.skipped_records += analysis.skipped_records;
                if analysis.malformed_terminal {
                    self.malformed_terminals += 1;
                }
            }
            Err(err) => {
                warn!(file = %path.display(), "Skipping log: {:#}", err);
                self.failed_files.push(path.to_path_buf());
            }
        }
        self
    }
}

fn log_diagnostic(path: &Path, diagnostic: &Diagnostic) {
    let file = path.display();
    let message = error_chain(diagnostic);
    match diagnostic {
        Diagnostic::MalformedRecord { line, .. } => warn!(%file, line, "{}", message),
        Diagnostic::MalformedTerminal { line: Some(line), .. } => {
            warn!(%file, line, "{}", message)
        }
        _ if diagnostic.is_severe() => warn!(%file, "{}", message),
        _ => debug!(%file, "{}", message),
    }
}

/// Reads one game log and extracts its events. Every problem found on the way is logged.
pub fn analyze_file(path: &Path) -> anyhow::Result<FileAnalysis> {
    let parsed = read_log_file(path)?;
    for diagnostic in &parsed.diagnostics {
        log_diagnostic(path, diagnostic);
    }

    let events = parsed.log.process();
    for anomaly in &events.anomalies {
        log_diagnostic(path, &Diagnostic::Anomaly(anomaly.clone()));
    }
    for move_event in &events.moves {
        trace!(
            file = %path.display(),
            piece = %move_event.piece,
            row = move_event.destination.row(),
            col = move_event.destination.col(),
            origin = ?move_event.origin_cell(),
            "Move"
        );
    }
    for capture in &events.captures {
        trace!(
            file = %path.display(),
            piece = %capture.piece,
            row = capture.cell.row(),
            col = capture.cell.col(),
            "Capture"
        );
    }
    debug!(
        file = %path.display(),
        outcome = %events.outcome,
        transitions = events.transitions,
        moves = events.moves.len(),
        captures = events.captures.len(),
    );

    Ok(FileAnalysis {
        skipped_records: parsed.skipped_records(),
        malformed_terminal: parsed.has_malformed_terminal(),
        events,
    })
}

/// Analyzes the given logs on up to `config.threads` threads.
///
/// Each thread gets a contiguous run of `paths`, and the partial results are
/// combined in the order of `paths`. The summary therefore does not depend
/// on the number of threads.
pub fn run_batch(paths: &[PathBuf], config: &BatchConfig) -> BatchSummary {
    if paths.is_empty() {
        return BatchSummary::default();
    }
    let threads = config.threads.clamp(1, paths.len());
    let chunk_size = paths.len().div_ceil(threads);
    info!(files = paths.len(), threads, "Analyzing game logs");

    let summary = thread::scope(|scope| {
        let workers: Vec<_> = paths
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk.iter().fold(BatchSummary::default(), |summary, path| {
                        summary.record(path, analyze_file(path))
                    })
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .fold(BatchSummary::default(), BatchSummary::combine)
    });

    info!(
        games = summary.statistics.games(),
        transitions = summary.statistics.transitions(),
        failed_files = summary.failed_files.len(),
        skipped_records = summary.skipped_records,
        "Finished analysis"
    );
    summary
}

/// Analyzes every log in `directory` with the configured extension.
pub fn analyze_directory(directory: &Path, config: &BatchConfig) -> anyhow::Result<BatchSummary> {
    let paths = discover_logs(directory, &config.extension)?;
    if paths.is_empty() {
        warn!(
            directory = %directory.display(),
            extension = %config.extension,
            "No game logs found"
        );
    }
    Ok(run_batch(&paths, config))
}
