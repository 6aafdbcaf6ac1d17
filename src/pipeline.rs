//! End-to-end notifier run
//!
//! [`build_report`] is the core: normalized text in, [`Report`] out, with no
//! collaborator involved. [`Notifier`] wraps it with retrieval, the
//! upcoming-dates lookup, rendering and publishing.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::algorithm::kinship::{DistanceEngine, RelationshipGraph};
use crate::algorithm::matching::HebrewDateMatcher;
use crate::calendar::{MonthTable, UpcomingWindow};
use crate::common::traits::{ResultPublisher, SourceRetriever, UpcomingDates};
use crate::config::{NotifierConfig, OutputFormat};
use crate::error::{ConfigError, Result};
use crate::gedcom::{GedcomParser, NormalizedSource, ParsedTree, decode, normalize};
use crate::report::{Report, ReportAssembler, render_json, render_markdown, render_title};
use crate::utils::io::{ArtifactRow, write_events_table};
use crate::utils::logging::{log_skips, log_step};

/// Steps logged by [`Notifier::run`]
const TOTAL_STEPS: usize = 7;

/// Report together with the intermediate results it was built from
#[derive(Debug, Clone)]
pub struct CoreOutput {
    /// Normalized source
    pub normalized: NormalizedSource,
    /// Parsed records and events
    pub parsed: ParsedTree,
    /// Assembled report
    pub report: Report,
}

/// Build the report for raw genealogy text and an upcoming window.
///
/// # Errors
/// Returns an error if the text cannot be normalized or the reference
/// individual is not in the tree
pub fn build_report(
    raw: &str,
    window: &UpcomingWindow,
    config: &NotifierConfig,
    months: MonthTable,
) -> Result<CoreOutput> {
    let normalized = normalize(raw)?;
    let parsed = GedcomParser::new(months).parse(&normalized.text);
    let report = assemble(&parsed, window, config, normalized.skipped.len())?;
    Ok(CoreOutput {
        normalized,
        parsed,
        report,
    })
}

/// Match, measure and assemble over an already parsed tree
fn assemble(
    parsed: &ParsedTree,
    window: &UpcomingWindow,
    config: &NotifierConfig,
    skipped_before_parse: usize,
) -> Result<Report> {
    let reference = config.reference_id.as_str();
    if !parsed.tree.contains_individual(reference) {
        return Err(ConfigError::UnknownReference(reference.to_string()).into());
    }

    let graph = RelationshipGraph::from_tree(&parsed.tree);
    let mut engine = DistanceEngine::new(&graph, reference)
        .map_err(|_| ConfigError::UnknownReference(reference.to_string()))?;

    let matches = HebrewDateMatcher::new(config.leap_month_policy).match_events(
        &parsed.events,
        window,
        &parsed.tree,
    );
    let skipped = skipped_before_parse + parsed.skipped.len();
    let report = ReportAssembler::new(&parsed.tree, config.distance_threshold).assemble(
        matches,
        &mut engine,
        window,
        skipped,
    );
    log::debug!("Distance lookups cached: {}", engine.cached());
    Ok(report)
}

/// Title and body in the configured format
///
/// # Errors
/// Returns an error if JSON rendering fails
pub fn render(report: &Report, config: &NotifierConfig) -> Result<(String, String)> {
    let title = render_title(report, config.locale);
    let body = match config.output_format {
        OutputFormat::Markdown => render_markdown(report, config.locale),
        OutputFormat::Json => render_json(report)?,
    };
    Ok((title, body))
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Assembled report
    pub report: Report,
    /// Published title
    pub title: String,
    /// Published body
    pub body: String,
}

/// A full run over the configured collaborators
#[derive(Debug)]
pub struct Notifier<'a> {
    config: NotifierConfig,
    retriever: &'a dyn SourceRetriever,
    dates: &'a dyn UpcomingDates,
    publisher: &'a dyn ResultPublisher,
    months: MonthTable,
    normalized_output: Option<PathBuf>,
}

impl<'a> Notifier<'a> {
    /// Create a notifier with the default month table
    #[must_use]
    pub fn new(
        config: NotifierConfig,
        retriever: &'a dyn SourceRetriever,
        dates: &'a dyn UpcomingDates,
        publisher: &'a dyn ResultPublisher,
    ) -> Self {
        Self {
            config,
            retriever,
            dates,
            publisher,
            months: MonthTable::default(),
            normalized_output: None,
        }
    }

    /// Use a different month table
    #[must_use]
    pub fn with_months(mut self, months: MonthTable) -> Self {
        self.months = months;
        self
    }

    /// Also write the normalized text to `path`
    #[must_use]
    pub fn with_normalized_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.normalized_output = Some(path.into());
        self
    }

    /// Configuration of this run
    #[must_use]
    pub const fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// First day of the window
    fn start_date(&self) -> NaiveDate {
        self.config
            .start_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run every step and publish the result
    ///
    /// # Errors
    /// Returns an error if retrieval, normalization, configuration checks,
    /// artifact writing or publishing fails
    pub fn run(&self) -> Result<RunSummary> {
        let mut step = 0;

        log_step(step, TOTAL_STEPS, &format!("Retrieving {}", self.retriever.describe()));
        let raw = decode(&self.retriever.retrieve()?);
        step += 1;

        log_step(step, TOTAL_STEPS, "Normalizing family tree");
        let normalized = normalize(&raw)?;
        if let Some(path) = &self.normalized_output {
            std::fs::write(path, &normalized.text)?;
            log::info!("Wrote normalized tree to {}", path.display());
        }
        step += 1;

        log_step(step, TOTAL_STEPS, "Parsing individuals, families and events");
        let parsed = GedcomParser::new(self.months.clone()).parse(&normalized.text);
        let mut skips = normalized.skipped.clone();
        skips.extend(parsed.skipped.clone());
        log_skips(&skips);
        step += 1;

        let start = self.start_date();
        log_step(
            step,
            TOTAL_STEPS,
            &format!("Looking up {} upcoming days from {start}", self.config.upcoming_days),
        );
        let window = self.dates.upcoming(start, self.config.upcoming_days);
        step += 1;

        log_step(step, TOTAL_STEPS, "Matching events and measuring distances");
        let report = assemble(&parsed, &window, &self.config, normalized.skipped.len())?;
        step += 1;

        log_step(step, TOTAL_STEPS, "Rendering report");
        let (title, body) = render(&report, &self.config)?;
        if let Some(path) = &self.config.events_table {
            write_events_table(path, &ArtifactRow::from_report(&report))?;
        }
        step += 1;

        log_step(step, TOTAL_STEPS, "Publishing report");
        self.publisher.publish(&title, &body, !report.is_empty())?;

        log::info!(
            "Run complete: {} entries, {} skipped",
            report.entries.len(),
            report.skipped
        );
        Ok(RunSummary {
            report,
            title,
            body,
        })
    }
}
