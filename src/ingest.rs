use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

use crate::error::Result;
use crate::models::StudentRecord;

/// A row dropped during ingestion, with its file position and reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of loading one dataset file.
#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub records: Vec<StudentRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Load student records from a CSV file with the upstream column contract.
///
/// Ingestion is best-effort over the rows: a row that fails to deserialize
/// or validate is skipped and reported, the rest proceed. Only file-level
/// failures (missing file, unreadable header) abort the load.
pub fn load_students(path: &Path) -> Result<IngestReport> {
    let mut reader = csv::Reader::from_path(path).map_err(into_io_error)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in reader.deserialize::<StudentRecord>().enumerate() {
        // Header occupies line 1
        let line = index as u64 + 2;
        match row {
            Ok(record) => {
                if let Err(validation) = record.validate() {
                    warn!(line, student_id = %record.student_id, "skipping invalid row");
                    skipped.push(SkippedRow {
                        line,
                        reason: format!("record {}: {}", record.student_id, validation),
                    });
                    continue;
                }
                records.push(record);
            }
            Err(e) => {
                warn!(line, error = %e, "skipping unparseable row");
                skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        path = %path.display(),
        loaded = records.len(),
        skipped = skipped.len(),
        "dataset loaded"
    );

    Ok(IngestReport { records, skipped })
}

fn into_io_error(err: csv::Error) -> crate::error::EngineError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => crate::error::EngineError::Io(io),
        other => crate::error::EngineError::Serialization(format!("{other:?}")),
    }
}
