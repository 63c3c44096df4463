//! Source data ingestion for the tourism metrics pipeline.
//!
//! This crate reads delimited text files into [`SourceTable`]s. Lines are split
//! on a single delimiter character without quote handling, and rows whose cell
//! count does not match the header are repaired by [`normalize_row`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tourism_ingest::CsvExtractor;
//!
//! let table = CsvExtractor::default().extract(Path::new("data/raw/regiones.csv"))?;
//! println!("{} rows x {} columns", table.height(), table.width());
//! ```
//!
//! [`SourceTable`]: tourism_model::SourceTable

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{CsvExtractor, DEFAULT_DELIMITER, normalize_row};
