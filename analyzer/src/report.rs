use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use brandubh::{visualize_heatmap, CaptureMatrix, Cell, OutcomeTally, PieceKind};
use serde::Serialize;

use crate::BatchSummary;

/// How many of the most frequent moves are listed per piece kind in the text report.
const TOP_MOVES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}

#[derive(Serialize)]
struct Totals {
    games: u32,
    transitions: u64,
    attacker_captures: u32,
    defender_captures: u32,
    king_captures: u32,
    anomalies: u32,
    skipped_records: usize,
    malformed_terminals: usize,
    failed_files: usize,
}

#[derive(Serialize)]
struct MoveFrequency {
    origin: Cell,
    destination: Cell,
    count: u32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    totals: Totals,
    outcomes: &'a OutcomeTally,
    move_trails: BTreeMap<PieceKind, &'a [(Cell, Cell)]>,
    move_frequencies: BTreeMap<PieceKind, Vec<MoveFrequency>>,
    unresolved_moves: BTreeMap<PieceKind, u32>,
    attacker_captures: &'a CaptureMatrix,
    defender_captures: &'a CaptureMatrix,
    king_captures: &'a CaptureMatrix,
    moves_per_game: &'a BTreeMap<usize, u32>,
    failed_files: &'a [PathBuf],
}

fn totals(summary: &BatchSummary) -> Totals {
    let stats = &summary.statistics;
    Totals {
        games: stats.games(),
        transitions: stats.transitions(),
        attacker_captures: stats.attacker_captures().total(),
        defender_captures: stats.defender_captures().total(),
        king_captures: stats.king_captures().total(),
        anomalies: stats.anomalies(),
        skipped_records: summary.skipped_records,
        malformed_terminals: summary.malformed_terminals,
        failed_files: summary.failed_files.len(),
    }
}

/// Most frequent first. Ties are ordered by cells.
fn sorted_frequencies(summary: &BatchSummary, piece: PieceKind) -> Vec<MoveFrequency> {
    let mut frequencies: Vec<MoveFrequency> = summary
        .statistics
        .move_frequencies(piece)
        .into_iter()
        .map(|((origin, destination), count)| MoveFrequency {
            origin,
            destination,
            count,
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}

pub fn render_json(summary: &BatchSummary) -> anyhow::Result<String> {
    let stats = &summary.statistics;
    let report = JsonReport {
        totals: totals(summary),
        outcomes: stats.outcomes(),
        move_trails: PieceKind::PIECES
            .into_iter()
            .map(|piece| (piece, stats.moves(piece)))
            .collect(),
        move_frequencies: PieceKind::PIECES
            .into_iter()
            .map(|piece| (piece, sorted_frequencies(summary, piece)))
            .collect(),
        unresolved_moves: PieceKind::PIECES
            .into_iter()
            .map(|piece| (piece, stats.unresolved_moves(piece)))
            .collect(),
        attacker_captures: stats.attacker_captures(),
        defender_captures: stats.defender_captures(),
        king_captures: stats.king_captures(),
        moves_per_game: stats.moves_per_game(),
        failed_files: &summary.failed_files,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_text(summary: &BatchSummary) -> String {
    let stats = &summary.statistics;
    let outcomes = stats.outcomes();

    let mut text = format!(
        "Games: {} ({} transitions)\n",
        stats.games(),
        stats.transitions()
    );
    text += &format!(
        "Outcomes: {} attacker wins, {} defender wins, {} draws, {} unknown\n",
        outcomes.attacker_wins, outcomes.defender_wins, outcomes.draws, outcomes.unknown
    );
    text += &format!(
        "Ignored: {} malformed records, {} malformed winner lines, {} unreadable files, {} anomalies\n",
        summary.skipped_records,
        summary.malformed_terminals,
        summary.failed_files.len(),
        stats.anomalies()
    );

    text += "\nMoves:\n";
    for piece in PieceKind::PIECES {
        text += &format!(
            "  {}: {} resolved, {} unresolved\n",
            piece,
            stats.moves(piece).len(),
            stats.unresolved_moves(piece)
        );
        for frequency in sorted_frequencies(summary, piece).iter().take(TOP_MOVES) {
            text += &format!(
                "    {} -> {}  {}x\n",
                frequency.origin, frequency.destination, frequency.count
            );
        }
    }

    if !stats.moves_per_game().is_empty() {
        text += "\nMoves per game:\n";
        for (moves, games) in stats.moves_per_game() {
            text += &format!("  {:>4} moves: {} games\n", moves, games);
        }
    }

    for (title, matrix) in [
        ("Attackers captured", stats.attacker_captures()),
        ("Defenders captured", stats.defender_captures()),
        ("King captured", stats.king_captures()),
    ] {
        text += &format!("\n{} ({} total):\n", title, matrix.total());
        text += &visualize_heatmap(matrix);
        text += "\n";
    }
    text
}

/// Writes the report to `output`, or to stdout if there is none.
pub fn write_report(
    summary: &BatchSummary,
    format: ReportFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = match format {
        ReportFormat::Json => render_json(summary)? + "\n",
        ReportFormat::Text => render_text(summary),
    };
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout().lock());
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use brandubh::{cell, AggregateStatistics, BoardGrid, GameLog, Outcome};

    use super::*;

    fn summary() -> BatchSummary {
        let start = BoardGrid::starting_position();
        let moved = start
            .with(cell!("(0, 3)"), PieceKind::Empty)
            .with(cell!("(0, 1)"), PieceKind::Attacker);
        let statistics = AggregateStatistics::new()
            .merge(&GameLog::new(vec![start, moved], Outcome::Attacker).process())
            .merge(&GameLog::new(vec![start, moved, start], Outcome::Draw).process());
        BatchSummary {
            statistics,
            failed_files: vec![PathBuf::from("logs/broken.txt")],
            skipped_records: 2,
            malformed_terminals: 0,
        }
    }

    #[test]
    fn json_report_fields() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&summary()).unwrap()).unwrap();
        assert_eq!(json["totals"]["games"], 2);
        assert_eq!(json["totals"]["transitions"], 3);
        assert_eq!(json["totals"]["skipped_records"], 2);
        assert_eq!(json["totals"]["king_captures"], 1);
        assert_eq!(json["totals"]["defender_captures"], 0);
        assert_eq!(json["outcomes"]["attacker_wins"], 1);
        assert_eq!(json["outcomes"]["draws"], 1);
        assert_eq!(json["move_trails"]["Attacker"][0], serde_json::json!([[0, 3], [0, 1]]));
        assert_eq!(json["move_trails"]["Attacker"].as_array().unwrap().len(), 3);
        assert_eq!(json["move_frequencies"]["Attacker"][0]["count"], 2);
        assert_eq!(json["move_trails"]["King"], serde_json::json!([]));
        assert_eq!(json["king_captures"][3][3], 1);
        assert_eq!(json["moves_per_game"]["1"], 1);
        assert_eq!(json["moves_per_game"]["2"], 1);
        assert_eq!(json["failed_files"][0], "logs/broken.txt");
    }

    #[test]
    fn text_report_sections() {
        let text = render_text(&summary());
        assert!(text.starts_with("Games: 2 (3 transitions)\n"));
        assert!(text.contains("Outcomes: 1 attacker wins, 0 defender wins, 1 draws, 0 unknown"));
        assert!(text.contains("  Attacker: 3 resolved, 0 unresolved\n    (0, 3) -> (0, 1)  2x\n"));
        assert!(text.contains("King captured (1 total):"));
        assert!(text.contains(" 3 │       1       │"));
    }

    #[test]
    fn report_to_file() {
        let dir = crate::reader::tests::unique_temp_dir("report");
        let path = dir.join("report.json");
        write_report(&summary(), ReportFormat::Json, Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(write_report(&summary(), ReportFormat::Text, Some(&dir.join("nope/x.txt"))).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
