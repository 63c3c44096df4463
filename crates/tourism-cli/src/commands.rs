//! Command execution.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tourism_core::{EtlPipeline, PipelineResult, load_settings};
use tourism_ingest::CsvExtractor;
use tourism_output::FileSystemLoader;
use tourism_transform::SchemaMapper;

/// Load the settings at `config_path` and run every configured dataset.
pub fn run_etl(config_path: &Path) -> Result<PipelineResult> {
    let settings = load_settings(config_path)
        .with_context(|| format!("load settings from {}", config_path.display()))?;
    let run_span = info_span!("run", project = %settings.project_name);
    let _run_guard = run_span.enter();
    info!(
        datasets = settings.datasets.len(),
        raw_data_dir = %settings.raw_data_dir.display(),
        processed_data_dir = %settings.processed_data_dir.display(),
        "starting run"
    );

    let transformer = SchemaMapper::new(settings.datasets.iter().cloned());
    let loader = FileSystemLoader::new(
        &settings.processed_data_dir,
        settings.unified_metrics_filename.clone(),
        settings.dataset_manifest_filename.clone(),
    )
    .context("prepare output directory")?;

    let mut pipeline = EtlPipeline::new(settings, CsvExtractor::new(), transformer, loader);
    pipeline.run()
}
