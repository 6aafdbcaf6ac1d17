//! Markdown and JSON rendering of a report

use std::fmt::Write as _;

use itertools::Itertools;

use super::assembler::{EnrichedEntry, EntryDetails, MarriageEnd, Report};
use super::locale::Locale;

/// Title of the published report: the Torah portion when known, else the start date
#[must_use]
pub fn render_title(report: &Report, locale: Locale) -> String {
    match (&report.torah_portion, report.window_start) {
        (Some(portion), _) => format!("{} {portion}", locale.title()),
        (None, Some(start)) => format!("{}: {}", locale.title(), start.format("%Y-%m-%d")),
        (None, None) => locale.title().to_string(),
    }
}

/// Age or duration text of an entry, empty when nothing is known
#[must_use]
pub fn details_text(entry: &EnrichedEntry, locale: Locale) -> String {
    match entry.details {
        EntryDetails::LivingBirthday { age } => age
            .map(|a| locale.birthday_age(entry.gender, a))
            .unwrap_or_default(),
        EntryDetails::DeceasedBirthday {
            age_at_death,
            years_since_birth,
        } => locale.deceased_birthday(entry.gender, age_at_death, years_since_birth),
        EntryDetails::Yahrzeit {
            years_since_death,
            age_at_death,
        } => locale.yahrzeit(entry.gender, years_since_death, age_at_death),
        EntryDetails::Anniversary { years, ended } => match ended {
            Some(MarriageEnd::Divorced { marriage_year }) => locale.divorced(marriage_year),
            Some(MarriageEnd::Death { duration }) => locale.married_until_death(duration),
            None => years.map(|y| locale.years_married(y)).unwrap_or_default(),
        },
    }
}

fn render_path(entry: &EnrichedEntry, locale: Locale) -> Option<String> {
    let path = entry.path.as_ref()?;
    // Stored reference first, read subject first
    let text = path
        .iter()
        .rev()
        .enumerate()
        .map(|(i, step)| {
            if i + 1 == path.len() {
                step.name.clone()
            } else {
                format!("{} ({})", step.name, locale.relation(step.relation))
            }
        })
        .join(" ");
    Some(text)
}

fn render_entry(out: &mut String, entry: &EnrichedEntry, locale: Locale) {
    let [event_label, name_label, distance_label, path_label] = locale.labels();
    let _ = writeln!(
        out,
        "### {} {}, {} ({})",
        entry.details.emoji(),
        locale.weekday(entry.weekday),
        locale.hebrew_date(entry.hebrew_date),
        entry.gregorian_date.format("%Y-%m-%d")
    );
    let _ = writeln!(out, "- **{event_label}:** {}", locale.event_name(entry.kind));

    let details = details_text(entry, locale);
    if details.is_empty() {
        let _ = writeln!(out, "- **{name_label}:** {}", entry.name);
    } else {
        let _ = writeln!(out, "- **{name_label}:** {} ({details})", entry.name);
    }
    if entry.coincides_with_gregorian {
        let _ = writeln!(out, "- {}", locale.coincides());
    }
    if let Some(distance) = entry.distance {
        let _ = writeln!(out, "- **{distance_label}:** {distance}");
    }
    if let Some(path) = render_path(entry, locale) {
        let _ = writeln!(out, "- **{path_label}:** {path}");
    }
    out.push('\n');
}

/// Markdown body of the published report
#[must_use]
pub fn render_markdown(report: &Report, locale: Locale) -> String {
    let mut out = String::new();
    match (report.window_start, report.window_end) {
        (Some(start), Some(end)) => {
            let _ = writeln!(
                out,
                "## {} ({} - {})\n",
                locale.heading(),
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            );
        }
        _ => {
            let _ = writeln!(out, "## {}\n", locale.heading());
        }
    }

    if report.is_empty() {
        let _ = writeln!(out, "{}", locale.no_events(report.window_days));
    }
    for entry in &report.entries {
        render_entry(&mut out, entry, locale);
    }
    if report.skipped > 0 {
        let _ = writeln!(out, "\n{}", locale.skipped_note(report.skipped));
    }
    out
}

/// Report as pretty-printed JSON
///
/// # Errors
/// Returns an error if serialization fails
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
