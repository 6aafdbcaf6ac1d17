//! A single `<level> [@xref@] <TAG> [value]` line.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Level, optional cross-reference, tag and optional value
static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\s+(?:(@[^@\s]+@)\s+)?(\S+)(?:\s+(.*))?$").expect("valid line regex")
});

/// A line without a level, as some exporters write continuation records
static LEVELLESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(@[^@\s]+@)\s+)?([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*))?$")
        .expect("valid levelless regex")
});

/// One structural line of a genealogy file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    /// Nesting depth, 0 for top-level records
    pub level: usize,
    /// Cross-reference identifier such as `@I1@`
    pub xref: Option<String>,
    /// Tag, e.g. `INDI`, `BIRT`, `DATE`
    pub tag: String,
    /// Remainder of the line
    pub value: Option<String>,
}

impl GedcomLine {
    /// Parse a trimmed line with an explicit level.
    ///
    /// Returns `None` when the line does not have the basic shape or the level
    /// does not fit in `usize`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = LINE_REGEX.captures(line)?;
        let level = caps.get(1)?.as_str().parse::<usize>().ok()?;
        Some(Self {
            level,
            xref: caps.get(2).map(|m| m.as_str().to_string()),
            tag: caps.get(3)?.as_str().to_string(),
            value: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Parse a trimmed line whose level is missing; the level is left at 0.
    #[must_use]
    pub fn parse_levelless(line: &str) -> Option<Self> {
        let caps = LEVELLESS_REGEX.captures(line)?;
        Some(Self {
            level: 0,
            xref: caps.get(1).map(|m| m.as_str().to_string()),
            tag: caps.get(2)?.as_str().to_string(),
            value: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Value as a string slice, empty when absent
    #[must_use]
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for GedcomLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(xref) = &self.xref {
            write!(f, " {xref}")?;
        }
        write!(f, " {}", self.tag)?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_and_field_lines() {
        let line = GedcomLine::parse("0 @I1@ INDI").unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.xref.as_deref(), Some("@I1@"));
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, None);

        let line = GedcomLine::parse("2 DATE @#DHEBREW@ 15 KSL 5785").unwrap();
        assert_eq!(line.level, 2);
        assert_eq!(line.xref, None);
        assert_eq!(line.value_str(), "@#DHEBREW@ 15 KSL 5785");
        assert_eq!(line.to_string(), "2 DATE @#DHEBREW@ 15 KSL 5785");
    }

    #[test]
    fn test_pointer_values_are_not_xrefs() {
        let line = GedcomLine::parse("1 HUSB @I1@").unwrap();
        assert_eq!(line.xref, None);
        assert_eq!(line.tag, "HUSB");
        assert_eq!(line.value_str(), "@I1@");
    }

    #[test]
    fn test_rejects_lines_without_shape() {
        assert!(GedcomLine::parse("NAME John").is_none());
        assert!(GedcomLine::parse("1").is_none());
        assert!(GedcomLine::parse_levelless("NAME John /Doe/").is_some());
        assert!(GedcomLine::parse_levelless("--- garbage ---").is_none());
    }
}
