//! Cleaned-copy export.
//!
//! The cleaned table is written as CSV with a header row and no index
//! column. Writes are atomic: write to `.tmp`, then rename over the target.

use std::fs;
use std::path::Path;

use polars::prelude::*;

use super::clean::CleanedTable;
use super::DataError;

/// Write the cleaned table to `path`, replacing any previous file.
pub fn write_cleaned_csv(cleaned: &CleanedTable, path: &Path) -> Result<(), DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| DataError::ExportFailed(format!("create dir: {e}")))?;
    }

    let tmp_path = path.with_extension("csv.tmp");
    let mut frame = cleaned.table().frame().clone();

    {
        let mut file = fs::File::create(&tmp_path)
            .map_err(|e| DataError::ExportFailed(format!("create file: {e}")))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)
            .map_err(|e| DataError::ExportFailed(format!("write csv: {e}")))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::ExportFailed(format!("atomic rename failed: {e}"))
    })?;

    tracing::info!(path = %path.display(), rows = frame.height(), "wrote cleaned copy");
    Ok(())
}
