//! Orchestration for the tourism metrics pipeline.
//!
//! - [`settings`]: YAML configuration loading
//! - [`contracts`]: the extract, transform and load capabilities
//! - [`pipeline`]: the run loop tying them together

pub mod contracts;
pub mod pipeline;
pub mod settings;

pub use contracts::{Extractor, Loader, Transformer};
pub use pipeline::{DatasetOutput, EtlPipeline, PipelineResult};
pub use settings::{Settings, SettingsError, load_settings};
