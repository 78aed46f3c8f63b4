use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use brandubh::{
    is_terminal_line, parse_snapshot, parse_terminal, GameLog, MalformedTerminal, Outcome,
};

use crate::error::Diagnostic;

/// A game log read from text, with the problems found along the way.
#[derive(Debug)]
pub struct ParsedLog {
    pub log: GameLog,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedLog {
    /// Number of board-state lines that could not be parsed.
    pub fn skipped_records(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedRecord { .. }))
            .count()
    }

    pub fn has_malformed_terminal(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MalformedTerminal { .. }))
    }
}

/// Splits a log into board snapshots and the winner line.
///
/// The last non-blank line is the winner line if it starts with `Winner:`.
/// Otherwise it is read as one more snapshot, and the outcome is unknown.
/// Lines that fail to parse are skipped, including a winner line that is
/// followed by more text. Blank lines are ignored. Line numbers in
/// diagnostics start at 1.
pub fn parse_log(text: &str) -> ParsedLog {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut diagnostics = Vec::new();

    let (records, terminal) = match lines.split_last() {
        Some((&(line_no, last), rest)) if is_terminal_line(last) => {
            let terminal = parse_terminal(last).map_err(|err| Diagnostic::MalformedTerminal {
                line: Some(line_no),
                err,
            });
            (rest, terminal)
        }
        _ => (
            lines.as_slice(),
            Err(Diagnostic::MalformedTerminal {
                line: None,
                err: MalformedTerminal::Missing,
            }),
        ),
    };

    let mut snapshots = Vec::with_capacity(records.len());
    for &(line, record) in records {
        match parse_snapshot(record) {
            Ok(grid) => snapshots.push(grid),
            Err(err) => diagnostics.push(Diagnostic::MalformedRecord { line, err }),
        }
    }

    let outcome = match terminal {
        Ok(outcome) => outcome,
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            Outcome::Unknown
        }
    };

    ParsedLog {
        log: GameLog::new(snapshots, outcome),
        diagnostics,
    }
}

pub fn read_log_file(path: &Path) -> anyhow::Result<ParsedLog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read game log {}", path.display()))?;
    Ok(parse_log(&text))
}

/// Lists the files in `directory` with the given extension, sorted by path.
pub fn discover_logs(directory: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Directory '{}' does not exist", directory.display());
    }
    let mut paths = Vec::new();
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to list {}", directory.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", directory.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use brandubh::{BoardGrid, Cell, PieceKind, SnapshotRecord};

    use super::*;

    pub(crate) fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir()
            .join("brandubh_analyzer_tests")
            .join(format!("{}_{}_{}", name, std::process::id(), nanos));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub(crate) fn snapshot_line(grid: &BoardGrid) -> String {
        serde_json::to_string(&SnapshotRecord::from_grid(grid)).unwrap()
    }

    /// A log of `moves` attacker shuffles between (0, 3) and (0, 2).
    pub(crate) fn shuffle_log(moves: usize, winner: &str) -> String {
        let start = BoardGrid::starting_position();
        let shifted = start
            .with(Cell::new(0, 3), PieceKind::Empty)
            .with(Cell::new(0, 2), PieceKind::Attacker);
        let mut lines: Vec<String> = (0..=moves)
            .map(|idx| snapshot_line(if idx % 2 == 0 { &start } else { &shifted }))
            .collect();
        lines.push(format!("Winner: {}", winner));
        lines.join("\n")
    }

    #[test]
    fn malformed_line_mid_file() {
        let text = shuffle_log(4, "Defender");
        let mut lines: Vec<&str> = text.lines().collect();
        lines.insert(3, "{\"board\": {\"(0, 3)\": ");
        let parsed = parse_log(&lines.join("\n"));

        assert_eq!(parsed.log.snapshots.len(), 5);
        assert_eq!(parsed.log.outcome, Outcome::Defender);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(matches!(
            parsed.diagnostics[0],
            Diagnostic::MalformedRecord { line: 4, .. }
        ));
        assert_eq!(parsed.skipped_records(), 1);
        assert_eq!(parsed.log.process().transitions, 4);
    }

    #[test]
    fn missing_winner_line() {
        let text = shuffle_log(2, "Attacker");
        let without_winner: Vec<&str> = text.lines().filter(|l| !l.starts_with("Winner")).collect();
        let parsed = parse_log(&without_winner.join("\n"));
        // The last board is still used
        assert_eq!(parsed.log.snapshots.len(), 3);
        assert_eq!(parsed.log.outcome, Outcome::Unknown);
        assert!(parsed.has_malformed_terminal());
        assert!(matches!(
            parsed.diagnostics[..],
            [Diagnostic::MalformedTerminal {
                line: None,
                err: MalformedTerminal::Missing
            }]
        ));
    }

    #[test]
    fn unknown_winner_value() {
        let parsed = parse_log(&shuffle_log(1, "Nobody"));
        assert_eq!(parsed.log.snapshots.len(), 2);
        assert_eq!(parsed.log.outcome, Outcome::Unknown);
        assert!(matches!(
            parsed.diagnostics[..],
            [Diagnostic::MalformedTerminal { line: Some(3), .. }]
        ));
        // Moves are still inferred
        assert_eq!(parsed.log.process().moves.len(), 1);
    }

    #[test]
    fn text_after_winner_line() {
        let text = format!("{}\nsession closed", shuffle_log(2, "Attacker"));
        let parsed = parse_log(&text);
        assert_eq!(parsed.log.snapshots.len(), 3);
        assert_eq!(parsed.log.outcome, Outcome::Unknown);
        assert!(matches!(
            parsed.diagnostics[..],
            [
                Diagnostic::MalformedRecord { line: 4, .. },
                Diagnostic::MalformedRecord { line: 5, .. },
                Diagnostic::MalformedTerminal {
                    line: None,
                    err: MalformedTerminal::Missing
                },
            ]
        ));
    }

    #[test]
    fn blank_lines_and_trailing_newline() {
        let text = format!("\n{}\n\n", shuffle_log(1, "Empty"));
        let parsed = parse_log(&text);
        assert_eq!(parsed.log.snapshots.len(), 2);
        assert_eq!(parsed.log.outcome, Outcome::Draw);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn empty_text() {
        let parsed = parse_log("");
        assert!(parsed.log.snapshots.is_empty());
        assert_eq!(parsed.log.outcome, Outcome::Unknown);
    }

    #[test]
    fn discovers_only_matching_files() {
        let dir = unique_temp_dir("discover");
        fs::write(dir.join("board_state_game_1_2.txt"), shuffle_log(1, "Attacker")).unwrap();
        fs::write(dir.join("board_state_game_1_1.txt"), shuffle_log(1, "Attacker")).unwrap();
        fs::write(dir.join("notes.md"), "not a log").unwrap();
        fs::create_dir_all(dir.join("nested.txt")).unwrap();

        let paths = discover_logs(&dir, "txt").unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["board_state_game_1_1.txt", "board_state_game_1_2.txt"]);

        assert!(discover_logs(&dir.join("missing"), "txt").is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
