//! Logging utilities
//!
//! Helpers that give operations, pipeline steps and skipped records a
//! consistent log line shape.

pub mod log;

pub use log::{log_operation_complete, log_operation_start, log_skips, log_step, log_warning};
