//! Run configuration
//!
//! [`RawSettings`] is what the environment or command line supplies, untyped.
//! [`NotifierConfig`] is the validated form; converting one into the other is
//! the only place a [`ConfigError`] is raised before the pipeline starts.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::algorithm::matching::LeapMonthPolicy;
use crate::error::ConfigError;
use crate::report::Locale;

/// Default number of hops up to which only the distance is shown
pub const DEFAULT_DISTANCE_THRESHOLD: u32 = 8;

/// Default lookahead window in days
pub const DEFAULT_UPCOMING_DAYS: usize = 7;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[^@\s]+@$").expect("valid identifier regex"));

/// Rendering of the published body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Markdown for an issue body
    #[default]
    Markdown,
    /// Pretty-printed JSON of the whole report
    Json,
}

impl OutputFormat {
    /// Setting value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Unsupported {
                name: "output format",
                value: s.to_string(),
            }),
        }
    }
}

/// Unvalidated settings as supplied from outside
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    /// Reference individual identifier
    pub reference_id: Option<String>,
    /// Distance display threshold
    pub distance_threshold: Option<String>,
    /// Output language
    pub locale: Option<String>,
    /// Lookahead window length
    pub upcoming_days: Option<String>,
    /// Leap-month policy name
    pub leap_month_policy: Option<String>,
    /// First day of the window, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Where to write the tabular artifact
    pub events_table: Option<PathBuf>,
    /// `markdown` or `json`
    pub output_format: Option<String>,
}

impl RawSettings {
    /// Read settings from the process environment
    ///
    /// Recognised variables: `PERSONID`, `DISTANCE_THRESHOLD`, `NOTIFIER_LANG`,
    /// `UPCOMING_DAYS`, `LEAP_MONTH_POLICY`. Empty values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the environment settings through `lookup`; empty values count as unset
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            reference_id: var("PERSONID"),
            distance_threshold: var("DISTANCE_THRESHOLD"),
            locale: var("NOTIFIER_LANG"),
            upcoming_days: var("UPCOMING_DAYS"),
            leap_month_policy: var("LEAP_MONTH_POLICY"),
            start_date: None,
            events_table: None,
            output_format: None,
        }
    }

    /// Settings with only the reference individual set
    #[must_use]
    pub fn for_reference(id: impl Into<String>) -> Self {
        Self {
            reference_id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Individual all distances are measured from
    pub reference_id: String,
    /// Paths are shown only for distances strictly above this
    pub distance_threshold: u32,
    /// Report language
    pub locale: Locale,
    /// Lookahead window length in days
    pub upcoming_days: usize,
    /// How anchors missing from the occurrence year are observed
    pub leap_month_policy: LeapMonthPolicy,
    /// First day of the window; today when unset
    pub start_date: Option<NaiveDate>,
    /// Where to write the tabular artifact, if anywhere
    pub events_table: Option<PathBuf>,
    /// Rendering of the published body
    pub output_format: OutputFormat,
}

impl NotifierConfig {
    /// Configuration with defaults for everything but the reference individual
    ///
    /// # Errors
    /// Returns an error if the identifier is not of the `@token@` form
    pub fn new(reference_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::try_from(RawSettings::for_reference(reference_id))
    }

    /// Set the distance threshold
    #[must_use]
    pub const fn with_distance_threshold(mut self, threshold: u32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Set the report language
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the window length
    #[must_use]
    pub const fn with_upcoming_days(mut self, days: usize) -> Self {
        self.upcoming_days = days;
        self
    }

    /// Set the leap-month policy
    #[must_use]
    pub const fn with_leap_month_policy(mut self, policy: LeapMonthPolicy) -> Self {
        self.leap_month_policy = policy;
        self
    }

    /// Set the rendering of the published body
    #[must_use]
    pub const fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set where the tabular artifact is written
    #[must_use]
    pub fn with_events_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.events_table = Some(path.into());
        self
    }

    /// Set the first day of the window
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }
}

fn parse_integer<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotAnInteger { name, value: raw }),
    }
}

impl TryFrom<RawSettings> for NotifierConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let reference_id = raw
            .reference_id
            .map(|id| id.trim().to_string())
            .ok_or(ConfigError::Missing("reference individual id"))?;
        if !IDENTIFIER.is_match(&reference_id) {
            return Err(ConfigError::InvalidIdentifier(reference_id));
        }

        let distance_threshold = parse_integer(
            "distance threshold",
            raw.distance_threshold,
            DEFAULT_DISTANCE_THRESHOLD,
        )?;
        let upcoming_days =
            parse_integer("upcoming days", raw.upcoming_days, DEFAULT_UPCOMING_DAYS)?;
        let locale = raw
            .locale
            .as_deref()
            .map_or(Ok(Locale::default()), str::parse)?;
        let leap_month_policy = raw
            .leap_month_policy
            .as_deref()
            .map_or(Ok(LeapMonthPolicy::default()), str::parse)?;
        let start_date = raw
            .start_date
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                    ConfigError::Unsupported {
                        name: "start date",
                        value: s,
                    }
                })
            })
            .transpose()?;
        let output_format = raw
            .output_format
            .as_deref()
            .map_or(Ok(OutputFormat::default()), str::parse)?;

        Ok(Self {
            reference_id,
            distance_threshold,
            locale,
            upcoming_days,
            leap_month_policy,
            start_date,
            events_table: raw.events_table,
            output_format,
        })
    }
}

impl fmt::Display for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Notifier Configuration:")?;
        writeln!(f, "  Reference Individual: {}", self.reference_id)?;
        writeln!(f, "  Distance Threshold: {}", self.distance_threshold)?;
        writeln!(f, "  Language: {}", self.locale)?;
        writeln!(f, "  Upcoming Days: {}", self.upcoming_days)?;
        writeln!(f, "  Leap Month Policy: {}", self.leap_month_policy)?;
        writeln!(f, "  Output Format: {}", self.output_format)?;
        if let Some(start) = self.start_date {
            writeln!(f, "  Start Date: {start}")?;
        }
        if let Some(path) = &self.events_table {
            writeln!(f, "  Events Table: {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotifierConfig::new("@I1@").unwrap();
        assert_eq!(config.distance_threshold, 8);
        assert_eq!(config.upcoming_days, 7);
        assert_eq!(config.locale, Locale::Hebrew);
        assert_eq!(config.leap_month_policy, LeapMonthPolicy::ShiftToAdjacent);
        assert!(config.start_date.is_none());
    }

    #[test]
    fn test_full_settings() {
        let raw = RawSettings {
            reference_id: Some(" @I42@ ".into()),
            distance_threshold: Some("3".into()),
            locale: Some("en".into()),
            upcoming_days: Some("14".into()),
            leap_month_policy: Some("skip".into()),
            start_date: Some("2025-03-01".into()),
            events_table: None,
            output_format: Some("JSON".into()),
        };
        let config = NotifierConfig::try_from(raw).unwrap();
        assert_eq!(config.reference_id, "@I42@");
        assert_eq!(config.distance_threshold, 3);
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.upcoming_days, 14);
        assert_eq!(config.leap_month_policy, LeapMonthPolicy::Skip);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            NotifierConfig::try_from(RawSettings::default()),
            Err(ConfigError::Missing("reference individual id"))
        );
        assert_eq!(
            NotifierConfig::new("I1"),
            Err(ConfigError::InvalidIdentifier("I1".into()))
        );

        let mut raw = RawSettings::for_reference("@I1@");
        raw.distance_threshold = Some("eight".into());
        assert!(matches!(
            NotifierConfig::try_from(raw),
            Err(ConfigError::NotAnInteger { name: "distance threshold", .. })
        ));

        let mut raw = RawSettings::for_reference("@I1@");
        raw.distance_threshold = Some("-1".into());
        assert!(NotifierConfig::try_from(raw).is_err());

        let mut raw = RawSettings::for_reference("@I1@");
        raw.locale = Some("fr".into());
        assert!(matches!(
            NotifierConfig::try_from(raw),
            Err(ConfigError::Unsupported { name: "language", .. })
        ));
    }

    #[test]
    fn test_lookup_treats_empty_as_unset() {
        let raw = RawSettings::from_lookup(|name| match name {
            "PERSONID" => Some("@I7@".into()),
            "UPCOMING_DAYS" => Some("10".into()),
            "LEAP_MONTH_POLICY" => Some("   ".into()),
            "NOTIFIER_LANG" => Some(String::new()),
            _ => None,
        });
        assert_eq!(raw.reference_id.as_deref(), Some("@I7@"));
        assert_eq!(raw.upcoming_days.as_deref(), Some("10"));
        assert_eq!(raw.leap_month_policy, None);
        assert_eq!(raw.locale, None);
        assert_eq!(raw.distance_threshold, None);
        assert_eq!(raw.start_date, None);
    }

    #[test]
    fn test_display_lists_settings() {
        let text = NotifierConfig::new("@I1@").unwrap().to_string();
        assert!(text.contains("  Reference Individual: @I1@"));
        assert!(text.contains("  Leap Month Policy: shift-to-adjacent"));
    }
}
