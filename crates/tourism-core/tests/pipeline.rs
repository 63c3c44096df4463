//! End-to-end runs of the pipeline over temporary data directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tourism_core::{EtlPipeline, Loader, Settings, load_settings};
use tourism_ingest::{CsvExtractor, IngestError};
use tourism_model::{CombinedTable, DatasetFrame, DatasetSettings};
use tourism_output::FileSystemLoader;
use tourism_transform::{SchemaMapper, TransformError};

fn regiones() -> DatasetSettings {
    DatasetSettings::new("regiones", "regiones.csv", "Regiones", "region", "recuento")
}

fn settings_for(root: &Path, datasets: Vec<DatasetSettings>) -> Settings {
    Settings {
        project_name: "Test".to_string(),
        owner: "CI".to_string(),
        raw_data_dir: root.join("data").join("raw"),
        processed_data_dir: root.join("data").join("processed"),
        datasets,
        unified_metrics_filename: "combined.csv".to_string(),
        dataset_manifest_filename: "manifest.json".to_string(),
    }
}

fn write_raw(settings: &Settings, filename: &str, contents: &str) {
    fs::create_dir_all(&settings.raw_data_dir).unwrap();
    fs::write(settings.raw_data_dir.join(filename), contents).unwrap();
}

fn filesystem_pipeline(
    settings: Settings,
) -> EtlPipeline<CsvExtractor, SchemaMapper, FileSystemLoader> {
    let mapper = SchemaMapper::new(settings.datasets.clone());
    let loader = FileSystemLoader::new(
        &settings.processed_data_dir,
        settings.unified_metrics_filename.clone(),
        settings.dataset_manifest_filename.clone(),
    )
    .expect("loader");
    EtlPipeline::new(settings, CsvExtractor::new(), mapper, loader)
}

/// Loader that only records how it was called.
#[derive(Debug, Default)]
struct RecordingLoader {
    persisted: Vec<String>,
    finalized: Vec<(usize, BTreeMap<String, String>)>,
}

impl Loader for RecordingLoader {
    fn persist_dataset(&mut self, frame: &DatasetFrame) -> anyhow::Result<PathBuf> {
        self.persisted.push(frame.dataset_name.clone());
        Ok(PathBuf::from(format!("{}.csv", frame.dataset_name)))
    }

    fn finalize(
        &mut self,
        combined: &CombinedTable,
        metadata: &BTreeMap<String, String>,
    ) -> anyhow::Result<()> {
        self.finalized.push((combined.len(), metadata.clone()));
        Ok(())
    }
}

#[test]
fn regiones_run_produces_tagged_records() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(root.path(), vec![regiones()]);
    write_raw(&settings, "regiones.csv", "region,recuento\nLos Ríos,10\nLagos,5\n");
    let processed = settings.processed_data_dir.clone();

    let result = filesystem_pipeline(settings).run().expect("run");

    assert_eq!(result.combined.len(), 2);
    for row in &result.combined.rows {
        assert_eq!(row.record.metric_group, "Regiones");
        assert_eq!(row.dataset_name, "regiones");
    }
    assert_eq!(result.combined.rows[0].record.category, "Los Ríos");
    assert_eq!(result.combined.rows[1].record.value, 5.0);
    assert_eq!(result.metadata["project"], "Test");
    assert_eq!(result.metadata["owner"], "CI");

    assert_eq!(result.dataset_count(), 1);
    assert_eq!(result.outputs[0].path, processed.join("regiones.csv"));
    assert_eq!(result.outputs[0].row_count, 2);
    assert!(processed.join("regiones.csv").exists());
    assert!(processed.join("manifest.json").exists());

    let combined = fs::read_to_string(processed.join("combined.csv")).unwrap();
    insta::assert_snapshot!(combined.trim_end(), @r"
    metric_group,category,value,percentage,highlight_value,highlight_percentage,dataset_name
    Regiones,Los Ríos,10.0,,,,regiones
    Regiones,Lagos,5.0,,,,regiones
    ");
}

#[test]
fn loader_called_once_per_dataset_then_finalized() {
    let root = TempDir::new().unwrap();
    let tipos = DatasetSettings::new("tipos", "tipos.csv", "Tipos", "tipo", "total")
        .with_percentage_field("porcentaje");
    let settings = settings_for(root.path(), vec![regiones(), tipos]);
    write_raw(&settings, "regiones.csv", "region,recuento\nLos Ríos,10\nLagos,5\n");
    write_raw(
        &settings,
        "tipos.csv",
        "grupo,tipo,total,porcentaje\nTipos,Bed and Breakfast, Familiar,4,40\nTipos,Hotel,6,60\n",
    );

    let mapper = SchemaMapper::new(settings.datasets.clone());
    let mut pipeline = EtlPipeline::new(
        settings,
        CsvExtractor::new(),
        mapper,
        RecordingLoader::default(),
    );
    let result = pipeline.run().expect("run");

    let loader = pipeline.loader();
    assert_eq!(loader.persisted, vec!["regiones", "tipos"]);
    assert_eq!(loader.finalized.len(), 1);
    assert_eq!(loader.finalized[0].0, 4);
    assert_eq!(loader.finalized[0].1, result.metadata);

    let names: Vec<&str> = result
        .combined
        .rows
        .iter()
        .map(|row| row.dataset_name.as_str())
        .collect();
    assert_eq!(names, vec!["regiones", "regiones", "tipos", "tipos"]);
    assert_eq!(
        result.combined.rows[2].record.category,
        "Bed and Breakfast,  Familiar"
    );
    assert_eq!(result.combined.rows[3].record.percentage, Some(60.0));
}

#[test]
fn repeated_runs_write_identical_combined_table() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(root.path(), vec![regiones()]);
    write_raw(&settings, "regiones.csv", "region,recuento\nLos Ríos,10\nLagos,5\n");
    let combined_path = settings.processed_data_dir.join("combined.csv");

    filesystem_pipeline(settings.clone()).run().expect("first run");
    let first = fs::read_to_string(&combined_path).unwrap();
    filesystem_pipeline(settings).run().expect("second run");
    let second = fs::read_to_string(&combined_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_source_aborts_with_ingest_error() {
    let root = TempDir::new().unwrap();
    let tipos = DatasetSettings::new("tipos", "tipos.csv", "Tipos", "tipo", "total");
    let settings = settings_for(root.path(), vec![regiones(), tipos]);
    write_raw(&settings, "regiones.csv", "region,recuento\nLagos,5\n");

    let mapper = SchemaMapper::new(settings.datasets.clone());
    let mut pipeline = EtlPipeline::new(
        settings,
        CsvExtractor::new(),
        mapper,
        RecordingLoader::default(),
    );
    let err = pipeline.run().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<IngestError>(),
        Some(IngestError::FileNotFound { .. })
    ));
    assert!(err.to_string().contains("tipos"));
    assert_eq!(pipeline.loader().persisted, vec!["regiones"]);
    assert!(pipeline.loader().finalized.is_empty());
}

#[test]
fn bad_value_aborts_with_transform_error() {
    let root = TempDir::new().unwrap();
    let settings = settings_for(root.path(), vec![regiones()]);
    write_raw(&settings, "regiones.csv", "region,recuento\nLagos,cinco\n");

    let mapper = SchemaMapper::new(settings.datasets.clone());
    let mut pipeline = EtlPipeline::new(
        settings,
        CsvExtractor::new(),
        mapper,
        RecordingLoader::default(),
    );
    let err = pipeline.run().unwrap_err();

    match err.downcast_ref::<TransformError>() {
        Some(TransformError::NumericCoercion { column, row, .. }) => {
            assert_eq!(column, "recuento");
            assert_eq!(*row, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(pipeline.loader().persisted.is_empty());
}

#[test]
fn runs_from_settings_file_in_declared_order() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("settings.yaml");
    fs::write(
        &config_path,
        "\
project:
  name: Empresas Certificadas
paths:
  raw_data_dir: ../data/raw
  processed_data_dir: ../data/processed
datasets:
  zonas:
    filename: zonas.csv
    metric_group: Zonas
    category_field: zona
    value_field: recuento
  alojamiento:
    filename: alojamiento.csv
    metric_group: Alojamiento
    category_field: tipo
    value_field: recuento
    percentage_field: porcentaje
outputs:
  unified_metrics_filename: unified_metrics.csv
  dataset_manifest_filename: dataset_manifest.json
",
    )
    .unwrap();

    let settings = load_settings(&config_path).expect("settings");
    assert_eq!(settings.project_name, "Empresas Certificadas");
    assert_eq!(settings.owner, "unknown");
    let order: Vec<&str> = settings.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(order, vec!["zonas", "alojamiento"]);

    write_raw(&settings, "zonas.csv", "zona,recuento\nNorte,3\n");
    write_raw(&settings, "alojamiento.csv", "tipo,recuento\nHotel,7\n");
    let processed = settings.processed_data_dir.clone();

    let result = filesystem_pipeline(settings).run().expect("run");

    assert_eq!(result.combined.rows[0].dataset_name, "zonas");
    assert_eq!(result.combined.rows[1].dataset_name, "alojamiento");
    assert_eq!(result.combined.rows[1].record.percentage, None);
    assert!(processed.join("unified_metrics.csv").exists());
    assert!(processed.join("dataset_manifest.json").exists());
}
