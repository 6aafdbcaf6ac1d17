//! Genealogy source read from the local file system

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::traits::SourceRetriever;
use crate::error::RetrievalError;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Reads the source file from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileRetriever {
    path: PathBuf,
}

impl LocalFileRetriever {
    /// Create a retriever for `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this retriever reads
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceRetriever for LocalFileRetriever {
    fn retrieve(&self) -> Result<Vec<u8>, RetrievalError> {
        let start = std::time::Instant::now();
        log_operation_start("Reading family tree from", &self.path);
        let bytes = std::fs::read(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => RetrievalError::NotFound(self.path.clone()),
            ErrorKind::PermissionDenied => RetrievalError::PermissionDenied(self.path.clone()),
            _ => RetrievalError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        log_operation_complete("read", &self.path, bytes.len(), Some(start.elapsed()));
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
