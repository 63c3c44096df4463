//! The extract, transform and load run loop.
//!
//! Datasets are processed one at a time in configuration order. The first
//! failure aborts the run; the error carries the dataset and source path as
//! context with the originating crate error as its root cause.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use tourism_model::{CombinedTable, DatasetFrame, DatasetSettings};

use crate::contracts::{Extractor, Loader, Transformer};
use crate::settings::Settings;

/// Where one dataset ended up after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOutput {
    pub dataset_name: String,
    pub path: PathBuf,
    pub row_count: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub combined: CombinedTable,
    /// Metadata handed to the loader (`project`, `owner`).
    pub metadata: BTreeMap<String, String>,
    /// Per-dataset outputs in processing order.
    pub outputs: Vec<DatasetOutput>,
}

impl PipelineResult {
    pub fn total_rows(&self) -> usize {
        self.combined.len()
    }

    pub fn dataset_count(&self) -> usize {
        self.outputs.len()
    }
}

/// Drives every configured dataset through extraction, transformation and
/// persistence, then writes the combined table.
pub struct EtlPipeline<E, T, L> {
    settings: Settings,
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> EtlPipeline<E, T, L>
where
    E: Extractor,
    T: Transformer,
    L: Loader,
{
    pub fn new(settings: Settings, extractor: E, transformer: T, loader: L) -> Self {
        Self {
            settings,
            extractor,
            transformer,
            loader,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Run the pipeline over all configured datasets.
    ///
    /// # Errors
    ///
    /// Returns the first extraction, transformation or persistence failure.
    pub fn run(&mut self) -> Result<PipelineResult> {
        let start = Instant::now();
        let mut frames = Vec::with_capacity(self.settings.datasets.len());
        let mut outputs = Vec::with_capacity(self.settings.datasets.len());

        for dataset in &self.settings.datasets {
            let span = info_span!("dataset", dataset = %dataset.name);
            let _guard = span.enter();

            let (frame, path) = process_dataset(
                &self.settings,
                dataset,
                &self.extractor,
                &self.transformer,
                &mut self.loader,
            )?;
            info!(
                rows = frame.row_count(),
                path = %path.display(),
                "dataset processed"
            );
            outputs.push(DatasetOutput {
                dataset_name: frame.dataset_name.clone(),
                path,
                row_count: frame.row_count(),
            });
            frames.push(frame);
        }

        let combined = CombinedTable::concat(&frames);
        let metadata = self.metadata();
        self.loader
            .finalize(&combined, &metadata)
            .context("finalize outputs")?;

        info!(
            datasets = outputs.len(),
            rows = combined.len(),
            duration_ms = start.elapsed().as_millis(),
            "pipeline complete"
        );
        Ok(PipelineResult {
            combined,
            metadata,
            outputs,
        })
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("project".to_string(), self.settings.project_name.clone()),
            ("owner".to_string(), self.settings.owner.clone()),
        ])
    }
}

fn process_dataset<E, T, L>(
    settings: &Settings,
    dataset: &DatasetSettings,
    extractor: &E,
    transformer: &T,
    loader: &mut L,
) -> Result<(DatasetFrame, PathBuf)>
where
    E: Extractor,
    T: Transformer,
    L: Loader,
{
    let source = settings.source_path(dataset);
    let table = extractor.extract(&source).with_context(|| {
        format!(
            "extract dataset '{}' from {}",
            dataset.name,
            source.display()
        )
    })?;
    debug!(
        source = %source.display(),
        columns = table.width(),
        rows = table.height(),
        "source extracted"
    );

    let metrics = transformer
        .transform(&dataset.name, &table)
        .with_context(|| {
            format!(
                "transform dataset '{}' from {}",
                dataset.name,
                source.display()
            )
        })?;

    let frame = DatasetFrame::new(dataset.name.clone(), metrics);
    let path = loader
        .persist_dataset(&frame)
        .with_context(|| format!("persist dataset '{}'", dataset.name))?;
    Ok((frame, path))
}
