//! Data model types for the tourism metrics pipeline.
//!
//! This crate holds the plain data shared by every stage of the pipeline:
//!
//! - [`table`]: Source tables as read from delimited text (header + rows of cells)
//! - [`dataset`]: Per-dataset field mapping configuration
//! - [`metric`]: The normalized metric schema and its tagged/combined forms
//! - [`manifest`]: Artifact records and the run manifest
//!
//! The crate has no I/O and no error types; ingestion, transformation and
//! persistence live in their own crates.

pub mod dataset;
pub mod manifest;
pub mod metric;
pub mod table;

pub use dataset::DatasetSettings;
pub use manifest::{DatasetArtifact, Manifest};
pub use metric::{
    CombinedTable, DATASET_NAME_COLUMN, DatasetFrame, METRIC_COLUMNS, MetricRecord, MetricTable,
    TaggedRecord,
};
pub use table::SourceTable;
