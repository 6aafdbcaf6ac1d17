//! Collaborator traits
//!
//! The pipeline reads the source, asks for upcoming dates and publishes its
//! result only through these interfaces.

pub mod collaborator;

pub use collaborator::{ResultPublisher, SourceRetriever, UpcomingDates};
