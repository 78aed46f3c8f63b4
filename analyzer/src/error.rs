use brandubh::{Anomaly, MalformedRecord, MalformedTerminal};

/// A problem with one game log that is reported and then worked around.
#[derive(Debug)]
pub enum Diagnostic {
    /// A board-state line was skipped.
    MalformedRecord { line: usize, err: MalformedRecord },
    /// The outcome of the game is unknown. `line` is `None` if the winner line is missing.
    MalformedTerminal {
        line: Option<usize>,
        err: MalformedTerminal,
    },
    /// The snapshots were read, but something about them is odd.
    Anomaly(Anomaly),
}

impl Diagnostic {
    /// Whether this indicates broken input rather than an unusual game.
    pub fn is_severe(&self) -> bool {
        match self {
            Diagnostic::MalformedRecord { .. } | Diagnostic::MalformedTerminal { .. } => true,
            Diagnostic::Anomaly(Anomaly::AmbiguousOrigin { .. }) => false,
            Diagnostic::Anomaly(_) => true,
        }
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Diagnostic::MalformedRecord { err, .. } => Some(err),
            Diagnostic::MalformedTerminal { err, .. } => Some(err),
            Diagnostic::Anomaly(anomaly) => Some(anomaly),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MalformedRecord { line, .. } => write!(f, "Skipping line {}", line),
            Diagnostic::MalformedTerminal {
                line: Some(line), ..
            } => write!(f, "Outcome of the game is unknown (line {})", line),
            Diagnostic::MalformedTerminal { line: None, .. } => {
                write!(f, "Outcome of the game is unknown")
            }
            Diagnostic::Anomaly(_) => write!(f, "Unusual game log"),
        }
    }
}

/// Renders an error and all its sources on a single line, outermost first.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(src_err) = source {
        message.push_str(": ");
        message.push_str(&src_err.to_string());
        source = src_err.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use brandubh::parse_snapshot;

    use super::*;

    #[test]
    fn chain_includes_json_error() {
        let err = parse_snapshot("{not json").unwrap_err();
        let diagnostic = Diagnostic::MalformedRecord { line: 4, err };
        let message = error_chain(&diagnostic);
        assert!(message.starts_with("Skipping line 4: Board state is not a valid JSON record: "));
        assert!(diagnostic.is_severe());
    }

    #[test]
    fn missing_terminal() {
        let diagnostic = Diagnostic::MalformedTerminal {
            line: None,
            err: MalformedTerminal::Missing,
        };
        assert_eq!(
            error_chain(&diagnostic),
            "Outcome of the game is unknown: Log does not end with a winner line"
        );
    }
}
