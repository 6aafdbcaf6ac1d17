//! Structural repair of raw genealogy text.
//!
//! Every kept line is rewritten into the canonical `<level> [@xref@] <TAG> [value]`
//! shape with single spaces between fields. Values keep their inner spacing
//! apart from the calendar escape. Lines that cannot be mapped onto that shape are
//! dropped and recorded. The output of [`normalize`] is a fixed point: feeding it
//! back in returns the same text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::line::GedcomLine;
use crate::error::FormatError;
use crate::models::{ParseSkip, SkipLog};

/// Canonical Hebrew calendar escape
pub const HEBREW_ESCAPE: &str = "@#DHEBREW@";

/// Spellings of the Hebrew calendar escape seen in exported files
static HEBREW_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*@#\s*d?\s*hebrew\s*@\s*").expect("valid escape regex")
});

/// Result of normalizing one file
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    /// Canonical text, one line per record line, ending in `0 TRLR`
    pub text: String,
    /// Lines that were dropped
    pub skipped: SkipLog,
    /// Lines that were kept but rewritten
    pub repaired: usize,
}

/// Decode raw bytes: strips a UTF-8 byte order mark and replaces invalid sequences.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Level implied by a tag when the line carries none
fn implied_level(line: &GedcomLine) -> Option<usize> {
    match line.tag.to_ascii_uppercase().as_str() {
        "HEAD" | "TRLR" => Some(0),
        "INDI" | "FAM" | "SUBM" | "SOUR" | "REPO" | "OBJE" | "NOTE" if line.xref.is_some() => {
            Some(0)
        }
        "NAME" | "SEX" | "BIRT" | "DEAT" | "BURI" | "FAMC" | "FAMS" | "HUSB" | "WIFE" | "CHIL"
        | "MARR" | "DIV" => Some(1),
        "DATE" | "PLAC" | "GIVN" | "SURN" => Some(2),
        _ => None,
    }
}

/// Replace every spelling of the Hebrew escape, set off by single spaces
fn canonical_value(value: &str) -> String {
    HEBREW_ESCAPE_REGEX
        .replace_all(value, format!(" {HEBREW_ESCAPE} "))
        .trim()
        .to_string()
}

/// Normalize raw text into canonical line form.
///
/// # Errors
/// Returns [`FormatError::Empty`] when there is no non-blank line and
/// [`FormatError::NoRecords`] when no top-level record other than the header
/// and trailer survives.
pub fn normalize(raw: &str) -> Result<NormalizedSource, FormatError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if raw.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let mut out: Vec<String> = Vec::new();
    let mut skipped = SkipLog::new();
    let mut repaired = 0;
    let mut previous_level: Option<usize> = None;
    let mut records = 0;

    for (idx, raw_line) in raw.split('\n').enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut line = match GedcomLine::parse(trimmed) {
            Some(line) => line,
            None => match GedcomLine::parse_levelless(trimmed)
                .and_then(|l| implied_level(&l).map(|level| GedcomLine { level, ..l }))
            {
                Some(line) => line,
                None => {
                    skipped.push(ParseSkip::at_line(line_no, format!("unrecognised line '{trimmed}'")));
                    continue;
                }
            },
        };

        line.tag = line.tag.to_ascii_uppercase();
        line.value = line
            .value
            .as_deref()
            .map(canonical_value)
            .filter(|v| !v.is_empty());

        match previous_level {
            None if line.level != 0 => {
                skipped.push(ParseSkip::at_line(line_no, "line precedes the first record"));
                continue;
            }
            Some(prev) if line.level > prev + 1 => line.level = prev + 1,
            _ => {}
        }

        // Dropped here and appended once at the end
        if line.tag == "TRLR" && line.level == 0 {
            continue;
        }
        if line.level == 0 && line.tag != "HEAD" {
            records += 1;
        }

        previous_level = Some(line.level);
        let rendered = line.to_string();
        if rendered != trimmed {
            repaired += 1;
        }
        out.push(rendered);
    }

    if records == 0 {
        return Err(FormatError::NoRecords {
            skipped: skipped.len(),
        });
    }

    out.push("0 TRLR".to_string());
    let mut text = out.join("\n");
    text.push('\n');

    log::debug!(
        "Normalized {} lines ({} repaired, {} skipped)",
        out.len(),
        repaired,
        skipped.len()
    );

    Ok(NormalizedSource {
        text,
        skipped,
        repaired,
    })
}
