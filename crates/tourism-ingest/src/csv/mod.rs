//! Delimited text reading.

mod reader;
mod row;

pub use reader::{CsvExtractor, DEFAULT_DELIMITER};
pub use row::normalize_row;
