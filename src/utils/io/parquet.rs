//! Tabular artifact of matched events
//!
//! One row per report entry, converted with `serde_arrow` and stored as a
//! Parquet file for external reporting tools.

use std::fs::File;
use std::path::Path;

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::ArtifactError;
use crate::report::{EnrichedEntry, Report};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// One matched event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRow {
    /// Subject identifiers, comma separated for couples
    pub individual_id: String,
    /// Display name
    pub name: String,
    /// `birthday`, `yahrzeit` or `anniversary`
    pub event_kind: String,
    /// Hebrew date of the occurrence, e.g. "15 Kislev 5785"
    pub hebrew_date: String,
    /// Gregorian date of the occurrence, `YYYY-MM-DD`
    pub gregorian_date: String,
    /// Hops from the reference individual
    pub distance: Option<u32>,
}

impl From<&EnrichedEntry> for ArtifactRow {
    fn from(entry: &EnrichedEntry) -> Self {
        Self {
            individual_id: entry.subject_ids.join(","),
            name: entry.name.clone(),
            event_kind: entry.kind.as_str().to_string(),
            hebrew_date: entry.hebrew_date.to_string(),
            gregorian_date: entry.gregorian_date.format("%Y-%m-%d").to_string(),
            distance: entry.distance.and_then(|d| u32::try_from(d).ok()),
        }
    }
}

impl ArtifactRow {
    /// Rows for every entry of a report, in report order
    #[must_use]
    pub fn from_report(report: &Report) -> Vec<Self> {
        report.entries.iter().map(Self::from).collect()
    }
}

fn to_record_batch(rows: &[ArtifactRow]) -> Result<RecordBatch, ArtifactError> {
    let fields = Vec::<FieldRef>::from_type::<ArtifactRow>(
        TracingOptions::default().allow_null_fields(true),
    )?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

/// Write rows to a Parquet file, replacing any existing file
///
/// # Arguments
/// * `path` - Destination file
/// * `rows` - Rows to write; an empty slice still writes the schema
///
/// # Errors
/// Returns an error if conversion or writing fails
pub fn write_events_table(path: &Path, rows: &[ArtifactRow]) -> Result<(), ArtifactError> {
    let start = std::time::Instant::now();
    log_operation_start("Writing events table to", path);

    let batch = to_record_batch(rows)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, rows.len(), Some(start.elapsed()));
    Ok(())
}

/// Read rows back from a Parquet file
///
/// # Arguments
/// * `path` - File written by [`write_events_table`]
///
/// # Returns
/// Rows in file order
///
/// # Errors
/// Returns an error if the file cannot be opened or does not have the expected columns
pub fn read_events_table(path: &Path) -> Result<Vec<ArtifactRow>, ArtifactError> {
    let start = std::time::Instant::now();
    log_operation_start("Reading events table from", path);

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        rows.extend(serde_arrow::from_record_batch::<Vec<ArtifactRow>>(&batch)?);
    }

    log_operation_complete("read", path, rows.len(), Some(start.elapsed()));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, distance: Option<u32>) -> ArtifactRow {
        ArtifactRow {
            individual_id: id.to_string(),
            name: "Dina".to_string(),
            event_kind: "birthday".to_string(),
            hebrew_date: "15 Kislev 5785".to_string(),
            gregorian_date: "2024-12-16".to_string(),
            distance,
        }
    }

    #[test]
    fn test_batch_has_one_column_per_field() {
        let batch = to_record_batch(&[row("@I1@", Some(2)), row("@I2@", None)]).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 6);
        assert!(batch.schema().field_with_name("distance").unwrap().is_nullable());
    }

    #[test]
    fn test_empty_table_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.parquet");
        write_events_table(&path, &[]).unwrap();
        assert!(path.exists());
        assert!(read_events_table(&path).unwrap().is_empty());
    }
}
