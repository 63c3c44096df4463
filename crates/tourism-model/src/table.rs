//! Source tables read from delimited text files.

/// A table of string cells with an ordered header.
///
/// Every row has exactly `headers.len()` cells once it has been through row
/// normalization. Header names are not required to be unique; lookups by name
/// resolve to the first matching column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of columns defined by the header.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (the header is not a row).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over the cells of column `index`, one per row.
    ///
    /// Rows shorter than the header yield an empty cell.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}
