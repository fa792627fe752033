pub mod csv;
pub mod json;
pub mod sqlite;

use std::io::Write;
use std::path::Path;

use crate::error::ReportError;
use crate::models::Summary;

pub use csv::CsvReport;
pub use json::JsonReport;
pub use sqlite::SqliteReport;

/// Output format adapter fed with the aggregated summary.
pub trait ReportWriter {
    /// Write the whole report, or nothing at all.
    fn write(&self, summary: &Summary) -> Result<(), ReportError>;

    /// Destination of the report.
    fn path(&self) -> &Path;

    /// Display name for this writer (e.g., "CSV").
    fn name(&self) -> &str;
}

/// Write `contents` to a temp file next to `path`, then move it into place.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".dut-report-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn atomic_write_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert!(!path.exists());
    }
}
