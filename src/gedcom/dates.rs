//! Reading `DATE` values.
//!
//! Hebrew dates use the calendar escape followed by day, month and year, e.g.
//! `@#DHEBREW@ 15 KSL 5785 (1924)`. Day may be written in digits or Hebrew
//! letters, the month by GEDCOM code or by name, and a Gregorian year may follow
//! in parentheses. Other values are treated as Gregorian and only their year is
//! kept.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::HEBREW_ESCAPE;
use crate::calendar::{AnchorDate, HebrewDate, MonthTable, parse_hebrew_numeral};
use crate::error::DateConversionError;
use crate::models::EventDate;

/// Offset between Hebrew and Gregorian year numbers for dates before Tishrei
pub const HEBREW_YEAR_OFFSET: i32 = 3760;

/// Approximation qualifiers that do not change the recurring day
const MODIFIERS: [&str; 5] = ["ABT", "EST", "CAL", "BEF", "AFT"];

static PARENTHESISED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("valid parenthesis regex"));

static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{4})\b").expect("valid year regex"));

fn first_year(text: &str) -> Option<i32> {
    FOUR_DIGITS
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '׳' | '״')
}

/// Read a day written as digits or as a Hebrew numeral
fn parse_day(token: &str) -> Result<u8, DateConversionError> {
    let bare: String = token.chars().filter(|&c| !is_quote(c)).collect();
    let value = if bare.chars().all(|c| c.is_ascii_digit()) && !bare.is_empty() {
        bare.parse::<u32>().ok()
    } else {
        parse_hebrew_numeral(&bare)
    };
    value
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| DateConversionError::UnreadableDay(token.to_string()))
}

fn parse_year(token: &str) -> Option<i32> {
    token
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| token.parse().ok())
        .flatten()
}

/// Parse a `DATE` value into an [`EventDate`].
///
/// Gregorian values never fail. A Hebrew value fails when its day or month
/// cannot be read or the date does not exist; a Hebrew value with only a month
/// or only a year succeeds without a recurring anchor.
///
/// The Gregorian year is taken from a parenthesised year, else from the
/// converted Hebrew date, else from the first four-digit number.
pub fn parse_date(value: &str, months: &MonthTable) -> Result<EventDate, DateConversionError> {
    let raw = value.trim();
    let paren_year = PARENTHESISED
        .captures_iter(raw)
        .filter_map(|c| c.get(1).and_then(|m| first_year(m.as_str())))
        .next();

    let Some(pos) = raw.find(HEBREW_ESCAPE) else {
        return Ok(EventDate {
            raw: raw.to_string(),
            anchor: None,
            gregorian_year: paren_year.or_else(|| first_year(raw)),
        });
    };

    let rest = PARENTHESISED.replace_all(&raw[pos + HEBREW_ESCAPE.len()..], " ");
    let tokens: Vec<&str> = rest
        .split_whitespace()
        .filter(|t| !MODIFIERS.contains(&t.to_ascii_uppercase().as_str()))
        .collect();
    if tokens.is_empty() {
        return Err(DateConversionError::Empty);
    }

    let mut date = EventDate {
        raw: raw.to_string(),
        anchor: None,
        gregorian_year: paren_year,
    };

    let Some((idx, width, month)) = months.find_in(&tokens) else {
        // Year-only values carry no recurring day
        if let [only] = tokens.as_slice() {
            if let Some(year) = parse_year(only) {
                date.gregorian_year = date.gregorian_year.or(Some(year - HEBREW_YEAR_OFFSET));
                return Ok(date);
            }
        }
        return Err(DateConversionError::UnknownMonth(rest.trim().to_string()));
    };

    let year = tokens.get(idx + width).and_then(|t| parse_year(t));
    if idx == 0 {
        // Month without a day
        date.gregorian_year = date
            .gregorian_year
            .or(year.map(|y| y - HEBREW_YEAR_OFFSET));
        return Ok(date);
    }

    let day = parse_day(tokens[idx - 1])?;
    let longest = if month.always_short() { 29 } else { 30 };
    if day == 0 || day > longest {
        return Err(DateConversionError::DayOutOfRange { day, month });
    }

    match year {
        Some(year) => {
            let hebrew = HebrewDate::new(year, month, day)?;
            let gregorian = hebrew.to_gregorian()?;
            date.anchor = Some(AnchorDate::from_date(hebrew));
            date.gregorian_year = date.gregorian_year.or(Some(gregorian.year()));
        }
        None => date.anchor = Some(AnchorDate::new(month, day)),
    }
    Ok(date)
}
