//! Capabilities the pipeline is generic over.
//!
//! Each trait has one implementation in this workspace. Alternative source
//! formats or sinks implement the same trait and plug into
//! [`EtlPipeline`](crate::EtlPipeline) unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use tourism_ingest::CsvExtractor;
use tourism_model::{CombinedTable, DatasetFrame, MetricTable, SourceTable};
use tourism_output::FileSystemLoader;
use tourism_transform::SchemaMapper;

/// Reads a raw source into a rectangular table.
pub trait Extractor {
    fn extract(&self, source: &Path) -> Result<SourceTable>;
}

/// Maps a source table of a named dataset onto the metric schema.
pub trait Transformer {
    fn transform(&self, dataset_name: &str, table: &SourceTable) -> Result<MetricTable>;
}

/// Persists processed datasets and the final combined output.
pub trait Loader {
    /// Persist one tagged dataset, returning where it was written.
    fn persist_dataset(&mut self, frame: &DatasetFrame) -> Result<PathBuf>;

    /// Persist the combined table together with run metadata.
    fn finalize(
        &mut self,
        combined: &CombinedTable,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()>;
}

impl Extractor for CsvExtractor {
    fn extract(&self, source: &Path) -> Result<SourceTable> {
        Ok(CsvExtractor::extract(self, source)?)
    }
}

impl Transformer for SchemaMapper {
    fn transform(&self, dataset_name: &str, table: &SourceTable) -> Result<MetricTable> {
        Ok(SchemaMapper::transform(self, dataset_name, table)?)
    }
}

impl Loader for FileSystemLoader {
    fn persist_dataset(&mut self, frame: &DatasetFrame) -> Result<PathBuf> {
        Ok(FileSystemLoader::persist_dataset(self, frame)?)
    }

    fn finalize(
        &mut self,
        combined: &CombinedTable,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()> {
        FileSystemLoader::finalize(self, combined, metadata)?;
        Ok(())
    }
}
