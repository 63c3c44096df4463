//! Pipeline settings loaded from a YAML file.
//!
//! Relative data directories are resolved against the directory holding the
//! settings file, so a run behaves the same from any working directory.
//! Datasets keep the order in which they appear in the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

use tourism_model::DatasetSettings;

const DEFAULT_PROJECT_NAME: &str = "Unnamed Project";
const DEFAULT_OWNER: &str = "unknown";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration for dataset '{dataset}': {source}")]
    InvalidDataset {
        dataset: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no datasets configured in {path}")]
    NoDatasets { path: PathBuf },
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_name: String,
    pub owner: String,
    /// Directory holding the raw source files.
    pub raw_data_dir: PathBuf,
    /// Directory receiving processed outputs.
    pub processed_data_dir: PathBuf,
    /// Datasets in processing order.
    pub datasets: Vec<DatasetSettings>,
    pub unified_metrics_filename: String,
    pub dataset_manifest_filename: String,
}

impl Settings {
    /// Full path of a dataset's source file.
    pub fn source_path(&self, dataset: &DatasetSettings) -> PathBuf {
        self.raw_data_dir.join(&dataset.filename)
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    project: RawProject,
    paths: RawPaths,
    #[serde(default)]
    datasets: Option<Mapping>,
    outputs: RawOutputs,
}

#[derive(Debug, Default, Deserialize)]
struct RawProject {
    name: Option<String>,
    owner: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    raw_data_dir: PathBuf,
    processed_data_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawOutputs {
    unified_metrics_filename: String,
    dataset_manifest_filename: String,
}

/// One entry of the `datasets` mapping; the name comes from its key.
#[derive(Debug, Deserialize)]
struct DatasetEntry {
    filename: String,
    metric_group: String,
    category_field: String,
    value_field: String,
    #[serde(default)]
    percentage_field: Option<String>,
    #[serde(default)]
    highlight_field: Option<String>,
    #[serde(default)]
    highlight_percentage_field: Option<String>,
}

impl DatasetEntry {
    fn into_settings(self, name: String) -> DatasetSettings {
        DatasetSettings {
            name,
            filename: self.filename,
            metric_group: self.metric_group,
            category_field: self.category_field,
            value_field: self.value_field,
            percentage_field: self.percentage_field,
            highlight_field: self.highlight_field,
            highlight_percentage_field: self.highlight_percentage_field,
        }
    }
}

/// Load settings from a YAML file.
///
/// # Errors
///
/// Fails when the file is missing or unreadable, when a required key is
/// absent, when a dataset entry is malformed, or when no dataset is
/// configured.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SettingsError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SettingsError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_settings(&text, path)
}

fn parse_settings(text: &str, path: &Path) -> Result<Settings, SettingsError> {
    let raw: RawSettings = serde_yaml::from_str(text).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let datasets = parse_datasets(raw.datasets.unwrap_or_default())?;
    if datasets.is_empty() {
        return Err(SettingsError::NoDatasets {
            path: path.to_path_buf(),
        });
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let settings = Settings {
        project_name: raw
            .project
            .name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        owner: raw
            .project
            .owner
            .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
        raw_data_dir: base_dir.join(raw.paths.raw_data_dir),
        processed_data_dir: base_dir.join(raw.paths.processed_data_dir),
        datasets,
        unified_metrics_filename: raw.outputs.unified_metrics_filename,
        dataset_manifest_filename: raw.outputs.dataset_manifest_filename,
    };
    debug!(
        path = %path.display(),
        datasets = settings.datasets.len(),
        "settings loaded"
    );
    Ok(settings)
}

fn parse_datasets(section: Mapping) -> Result<Vec<DatasetSettings>, SettingsError> {
    let mut datasets = Vec::with_capacity(section.len());
    for (key, value) in section {
        let name = dataset_name(&key);
        let entry: DatasetEntry =
            serde_yaml::from_value(value).map_err(|e| SettingsError::InvalidDataset {
                dataset: name.clone(),
                source: e,
            })?;
        datasets.push(entry.into_settings(name));
    }
    Ok(datasets)
}

/// Dataset keys are normally strings; scalars such as `2023:` are accepted too.
fn dataset_name(key: &Value) -> String {
    match key {
        Value::String(name) => name.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
