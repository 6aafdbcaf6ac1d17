//! Collaborator adapters
//!
//! Implementations of the traits in [`crate::common::traits`] for running
//! locally or inside a workflow runner.

pub mod calendar;
pub mod file;
pub mod publish;

pub use calendar::CalendarSource;
pub use file::LocalFileRetriever;
pub use publish::{StdoutPublisher, WorkflowOutputPublisher};
