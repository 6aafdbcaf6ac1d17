//! Logging utilities
//!
//! Standardized log lines for file operations, pipeline steps and skipped
//! records.

use std::path::Path;

use crate::models::SkipLog;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "read" or "wrote"
/// * `path` - Path of the file that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items ({}) in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!("Successfully {} {} items ({})", operation, items, path.display()),
    }
}

/// Log a warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log the start of a pipeline step
///
/// # Arguments
/// * `step` - Zero-based index of the step
/// * `total` - Number of steps in the run
/// * `message` - What the step does
pub fn log_step(step: usize, total: usize, message: &str) {
    log::info!("[Step {}/{}] {}", step + 1, total, message);
}

/// Summarize skipped records after parsing
///
/// Each skip was already logged when it was recorded; this only reports the total.
pub fn log_skips(skips: &SkipLog) {
    if skips.is_empty() {
        log::info!("No records skipped");
    } else {
        log_warning(
            &format!("{} lines or records were skipped", skips.len()),
            None,
        );
    }
}
