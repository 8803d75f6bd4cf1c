//! Filesystem utilities for the CSV writers

use std::fs;
use std::path::Path;

use crate::error::GenerateError;

pub type CsvWriter = csv::Writer<fs::File>;

/// Create a directory and its parents if they don't exist
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), GenerateError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Open a headerless CSV writer, creating parent directories if needed.
///
/// An existing file at `path` is truncated.
pub fn create_csv<P: AsRef<Path>>(path: P) -> Result<CsvWriter, GenerateError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let file = fs::File::create(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file))
}

/// Flush a writer, attributing failures to `path`
pub fn finish_csv<P: AsRef<Path>>(mut writer: CsvWriter, path: P) -> Result<(), GenerateError> {
    writer.flush().map_err(|source| GenerateError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

/// Map a `csv::Error` onto the file it came from
pub fn csv_err<P: AsRef<Path>>(path: P) -> impl FnOnce(csv::Error) -> GenerateError {
    let path = path.as_ref().to_path_buf();
    move |source| GenerateError::Csv { path, source }
}
