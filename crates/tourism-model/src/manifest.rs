//! Artifact records and the run manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One stored dataset output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetArtifact {
    pub dataset_name: String,
    /// Location of the stored file, relative to the output directory's parent.
    pub path: String,
    pub row_count: usize,
}

/// Summary of everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub artifacts: Vec<DatasetArtifact>,
    pub metadata: BTreeMap<String, String>,
}
