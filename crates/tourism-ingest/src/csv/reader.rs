//! Line-oriented reading of delimited text sources.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tourism_model::SourceTable;
use tracing::debug;

use crate::error::{IngestError, Result};

use super::row::normalize_row;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// Reads a delimited text file into a [`SourceTable`].
///
/// Each line is one record, split on a single delimiter character. There is no
/// quote handling: delimiters inside a field produce extra cells, which
/// [`normalize_row`] folds back into the second column.
#[derive(Debug, Clone, Copy)]
pub struct CsvExtractor {
    delimiter: char,
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different single-character delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Reads `path` into a table.
    ///
    /// The first line is the header. Whitespace-only lines after it are
    /// skipped; every other line becomes exactly one row of header width.
    /// A header-only file yields a table with no rows.
    ///
    /// # Errors
    ///
    /// - [`IngestError::FileNotFound`] if `path` does not exist
    /// - [`IngestError::EmptySource`] if the file has no lines at all
    /// - [`IngestError::FileRead`] on any other I/O or UTF-8 decoding failure
    pub fn extract(&self, path: &Path) -> Result<SourceTable> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let mut lines = BufReader::new(file).lines();

        let Some(first) = lines.next() else {
            return Err(IngestError::EmptySource {
                path: path.to_path_buf(),
            });
        };
        let first = first.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Skip BOM if present
        let header_line = first.strip_prefix('\u{feff}').unwrap_or(&first);
        let headers = self.split_line(header_line);

        let mut rows = Vec::new();
        let mut repaired = 0usize;
        for (offset, line_result) in lines.enumerate() {
            let line = line_result.map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let cells = self.split_line(&line);
            if cells.len() != headers.len() {
                repaired += 1;
                debug!(
                    path = %path.display(),
                    line = offset + 2,
                    cells = cells.len(),
                    expected = headers.len(),
                    "normalizing row width"
                );
            }
            rows.push(normalize_row(cells, &headers));
        }

        debug!(
            path = %path.display(),
            columns = headers.len(),
            rows = rows.len(),
            repaired,
            "source table read"
        );

        Ok(SourceTable::new(headers, rows))
    }

    fn split_line(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter).map(str::to_string).collect()
    }
}
