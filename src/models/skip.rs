//! Per-record problems that are reported but never abort a run

use std::fmt;

use serde::{Deserialize, Serialize};

/// One line or record that was left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSkip {
    /// 1-based line number in the text the stage read, when it applies
    pub line: Option<usize>,
    /// What was wrong
    pub reason: String,
}

impl ParseSkip {
    /// Skip tied to a line
    #[must_use]
    pub fn at_line(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Skip tied to a record rather than a line
    #[must_use]
    pub fn record(reason: impl Into<String>) -> Self {
        Self {
            line: None,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// Ordered collection of skips, logged as they are recorded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipLog {
    entries: Vec<ParseSkip>,
}

impl SkipLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skip and emit it as a warning
    pub fn push(&mut self, skip: ParseSkip) {
        log::warn!("Skipped {skip}");
        self.entries.push(skip);
    }

    /// Append another log without logging its entries again
    pub fn extend(&mut self, other: SkipLog) {
        self.entries.extend(other.entries);
    }

    /// Number of skips
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was skipped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Skips in recording order
    pub fn iter(&self) -> impl Iterator<Item = &ParseSkip> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_log_keeps_order() {
        let mut log = SkipLog::new();
        log.push(ParseSkip::at_line(3, "bad level"));
        let mut other = SkipLog::new();
        other.push(ParseSkip::record("unknown family member @I9@"));
        log.extend(other);

        assert_eq!(log.len(), 2);
        let rendered: Vec<String> = log.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["line 3: bad level", "unknown family member @I9@"]);
    }
}
