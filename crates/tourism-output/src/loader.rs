//! Filesystem persistence of datasets, the combined table and the manifest.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info};

use tourism_model::{CombinedTable, DatasetArtifact, DatasetFrame, Manifest};

use crate::error::{OutputError, Result};
use crate::frame::{combined_dataframe, dataset_dataframe};

/// Writes processed datasets and the run manifest to a directory.
///
/// Every persisted dataset is recorded as a [`DatasetArtifact`]; the
/// accumulated list is written into the manifest by [`finalize`].
///
/// [`finalize`]: FileSystemLoader::finalize
#[derive(Debug)]
pub struct FileSystemLoader {
    output_dir: PathBuf,
    unified_filename: String,
    manifest_filename: String,
    artifacts: Vec<DatasetArtifact>,
}

impl FileSystemLoader {
    /// Create a loader writing into `output_dir`, creating it if needed.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        unified_filename: impl Into<String>,
        manifest_filename: impl Into<String>,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        ensure_output_dir(&output_dir)?;
        Ok(Self {
            output_dir,
            unified_filename: unified_filename.into(),
            manifest_filename: manifest_filename.into(),
            artifacts: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Artifacts recorded so far, in persistence order.
    pub fn artifacts(&self) -> &[DatasetArtifact] {
        &self.artifacts
    }

    pub fn unified_path(&self) -> PathBuf {
        self.output_dir.join(&self.unified_filename)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_filename)
    }

    /// Write one dataset as `<output_dir>/<dataset_name>.csv` and record it.
    ///
    /// Returns the path of the written file.
    pub fn persist_dataset(&mut self, frame: &DatasetFrame) -> Result<PathBuf> {
        let output_path = self
            .output_dir
            .join(format!("{}.csv", frame.dataset_name));
        let mut df = dataset_dataframe(frame)?;
        write_csv(&output_path, &mut df)?;

        let artifact = DatasetArtifact {
            dataset_name: frame.dataset_name.clone(),
            path: artifact_path(&self.output_dir, &output_path),
            row_count: frame.row_count(),
        };
        debug!(
            dataset = %artifact.dataset_name,
            path = %artifact.path,
            rows = artifact.row_count,
            "dataset persisted"
        );
        self.artifacts.push(artifact);
        Ok(output_path)
    }

    /// Write the combined table and the manifest.
    ///
    /// The manifest carries a generation timestamp, every artifact recorded by
    /// [`persist_dataset`](Self::persist_dataset), and `metadata` as given.
    pub fn finalize(
        &mut self,
        combined: &CombinedTable,
        metadata: &BTreeMap<String, String>,
    ) -> Result<Manifest> {
        let combined_path = self.unified_path();
        let mut df = combined_dataframe(combined)?;
        write_csv(&combined_path, &mut df)?;

        let manifest = Manifest {
            generated_at: Utc::now().to_rfc3339(),
            artifacts: self.artifacts.clone(),
            metadata: metadata.clone(),
        };
        let manifest_path = self.manifest_path();
        let payload = serde_json::to_string_pretty(&manifest)?;
        fs::write(&manifest_path, payload).map_err(|e| OutputError::Io {
            path: manifest_path.clone(),
            source: e,
        })?;

        info!(
            combined = %combined_path.display(),
            manifest = %manifest_path.display(),
            rows = combined.len(),
            artifacts = manifest.artifacts.len(),
            "outputs finalized"
        );
        Ok(manifest)
    }
}

/// Ensure an output directory exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Path recorded in the manifest: relative to the output directory's parent.
fn artifact_path(output_dir: &Path, output_path: &Path) -> String {
    let relative = output_dir
        .parent()
        .and_then(|parent| output_path.strip_prefix(parent).ok())
        .unwrap_or(output_path);
    relative.to_string_lossy().into_owned()
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
