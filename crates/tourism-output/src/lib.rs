//! Output generation for the tourism metrics pipeline.
//!
//! Writes each normalized dataset as CSV, then the combined table and a JSON
//! manifest listing every artifact. Tables go through Polars DataFrames so
//! that nulls, quoting and float formatting are handled by `CsvWriter`.

mod error;
mod frame;
mod loader;

pub use error::{OutputError, Result};
pub use frame::{combined_dataframe, dataset_dataframe};
pub use loader::{FileSystemLoader, ensure_output_dir};
