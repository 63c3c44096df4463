//! Tourism metrics transformation crate.
//!
//! Projects arbitrary source tables into the fixed metric schema
//! (`metric_group`, `category`, `value`, `percentage`, `highlight_value`,
//! `highlight_percentage`) using per-dataset field mappings.
//!
//! # Example
//!
//! ```ignore
//! use tourism_transform::SchemaMapper;
//!
//! let mapper = SchemaMapper::new(settings.datasets.clone());
//! let metrics = mapper.transform("regiones", &source_table)?;
//! ```
//!
//! # Design Principles
//!
//! - **Configuration-driven**: column names come from dataset settings, never from code
//! - **Strict value, lenient extras**: the value column must be numeric; optional
//!   numeric columns degrade to empty cells per row
//! - **Deterministic errors**: missing columns are reported sorted and deduplicated

mod error;
mod mapper;

pub mod normalization;

// Error type
pub use error::{Result, TransformError};

// Mapping
pub use mapper::SchemaMapper;
