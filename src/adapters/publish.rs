//! Report publishers
//!
//! [`WorkflowOutputPublisher`] appends step outputs to the file a workflow
//! runner names in `GITHUB_OUTPUT`; a later step turns them into an issue.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::traits::ResultPublisher;
use crate::error::PublishError;

/// Delimiter of the multi-line body output
const BODY_DELIMITER: &str = "EOF";

/// Appends `issue_title`, `issue_body` and `has_relevant_dates` outputs to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutputPublisher {
    path: PathBuf,
}

impl WorkflowOutputPublisher {
    /// Create a publisher for the output file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Text appended to the workflow output file
#[must_use]
pub fn workflow_outputs(title: &str, body: &str, has_relevant_dates: bool) -> String {
    let mut out = format!("issue_title={}\n", title.replace('\n', " "));
    out.push_str(&format!("issue_body<<{BODY_DELIMITER}\n"));
    out.push_str(body.trim_end_matches('\n'));
    out.push_str(&format!("\n{BODY_DELIMITER}\n"));
    out.push_str(&format!("has_relevant_dates={has_relevant_dates}\n"));
    out
}

impl ResultPublisher for WorkflowOutputPublisher {
    fn publish(
        &self,
        title: &str,
        body: &str,
        has_relevant_dates: bool,
    ) -> Result<(), PublishError> {
        let io_error = |source| PublishError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        file.write_all(workflow_outputs(title, body, has_relevant_dates).as_bytes())
            .map_err(io_error)?;
        log::info!("Wrote report outputs to {}", self.path.display());
        Ok(())
    }
}

/// Prints the title and body
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPublisher;

impl ResultPublisher for StdoutPublisher {
    fn publish(
        &self,
        title: &str,
        body: &str,
        _has_relevant_dates: bool,
    ) -> Result<(), PublishError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "# {title}\n").map_err(PublishError::Stdout)?;
        write!(stdout, "{body}").map_err(PublishError::Stdout)?;
        stdout.flush().map_err(PublishError::Stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format() {
        let text = workflow_outputs("Title", "## Heading\n\nline\n", true);
        assert_eq!(
            text,
            "issue_title=Title\nissue_body<<EOF\n## Heading\n\nline\nEOF\nhas_relevant_dates=true\n"
        );
    }

    #[test]
    fn test_appends_to_existing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "previous=1\n").unwrap();

        WorkflowOutputPublisher::new(&path)
            .publish("T", "body", false)
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("previous=1\nissue_title=T\n"));
        assert!(text.ends_with("has_relevant_dates=false\n"));
    }

    #[test]
    fn test_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = WorkflowOutputPublisher::new(dir.path().join("missing").join("output"));
        assert!(matches!(
            publisher.publish("T", "B", true),
            Err(PublishError::Io { .. })
        ));
    }
}
