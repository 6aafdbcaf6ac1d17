use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use family_tree_notifier::adapters::{
    CalendarSource, LocalFileRetriever, StdoutPublisher, WorkflowOutputPublisher,
};
use family_tree_notifier::common::traits::ResultPublisher;
use family_tree_notifier::{Notifier, NotifierConfig, RawSettings};

/// Report upcoming Hebrew-calendar family events from a GEDCOM file
#[derive(Parser, Debug, Clone)]
#[command(name = "family-tree-notifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Args {
    /// GEDCOM file to read
    #[arg(short, long, default_value = "tree.ged")]
    input: PathBuf,

    /// Reference individual, e.g. @I1@
    #[arg(short, long, env = "PERSONID")]
    reference: Option<String>,

    /// Paths are shown only for distances above this
    #[arg(long, env = "DISTANCE_THRESHOLD")]
    distance_threshold: Option<String>,

    /// Report language: he or en
    #[arg(long, env = "NOTIFIER_LANG")]
    lang: Option<String>,

    /// Days to look ahead
    #[arg(long, env = "UPCOMING_DAYS")]
    days: Option<String>,

    /// First day of the window (YYYY-MM-DD), default today
    #[arg(long)]
    start_date: Option<String>,

    /// shift-to-adjacent or skip
    #[arg(long, env = "LEAP_MONTH_POLICY")]
    leap_month_policy: Option<String>,

    /// Write matched events as a Parquet table
    #[arg(long)]
    events_table: Option<PathBuf>,

    /// Append issue outputs to this file instead of printing
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,

    /// Body format: markdown or json
    #[arg(short, long)]
    format: Option<String>,

    /// Write the normalized GEDCOM text to this file
    #[arg(long)]
    normalized_output: Option<PathBuf>,
}

impl From<Args> for RawSettings {
    fn from(args: Args) -> Self {
        Self {
            reference_id: args.reference,
            distance_threshold: args.distance_threshold,
            locale: args.lang,
            upcoming_days: args.days,
            leap_month_policy: args.leap_month_policy,
            start_date: args.start_date,
            events_table: args.events_table,
            output_format: args.format,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let input = args.input.clone();
    let github_output = args.github_output.clone().filter(|p| !p.as_os_str().is_empty());
    let normalized_output = args.normalized_output.clone();

    let config = NotifierConfig::try_from(RawSettings::from(args))
        .context("Invalid configuration")?;
    info!("{config}");

    let retriever = LocalFileRetriever::new(&input);
    let dates = CalendarSource::new();
    let publisher: Box<dyn ResultPublisher> = match github_output {
        Some(path) => Box::new(WorkflowOutputPublisher::new(path)),
        None => Box::new(StdoutPublisher),
    };

    let mut notifier = Notifier::new(config, &retriever, &dates, publisher.as_ref());
    if let Some(path) = normalized_output {
        notifier = notifier.with_normalized_output(path);
    }

    let summary = notifier
        .run()
        .with_context(|| format!("Notifier run over {} failed", input.display()))?;
    info!("Published: {}", summary.title);
    Ok(())
}
