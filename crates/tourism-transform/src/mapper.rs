//! Projection of source tables into the metric schema.

use std::collections::{BTreeMap, BTreeSet};

use tourism_model::{DatasetSettings, MetricRecord, MetricTable, SourceTable};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::normalization::{parse_numeric, transform_to_numeric};

/// Maps any configured dataset onto the metric schema.
///
/// The mapper is built from the configured dataset settings and looks each
/// dataset up by name when transforming.
#[derive(Debug, Clone, Default)]
pub struct SchemaMapper {
    datasets: BTreeMap<String, DatasetSettings>,
}

impl SchemaMapper {
    pub fn new(datasets: impl IntoIterator<Item = DatasetSettings>) -> Self {
        Self {
            datasets: datasets
                .into_iter()
                .map(|settings| (settings.name.clone(), settings))
                .collect(),
        }
    }

    /// Settings registered for `dataset_name`.
    pub fn dataset(&self, dataset_name: &str) -> Option<&DatasetSettings> {
        self.datasets.get(dataset_name)
    }

    /// Transforms `table` into metric records using the settings registered
    /// for `dataset_name`.
    ///
    /// One record is produced per source row, in row order. The value column
    /// must be numeric in every row; optional numeric columns that are unset
    /// or absent from the table yield `None` for every row, and individual
    /// unparsable cells yield `None` for that row only.
    ///
    /// # Errors
    ///
    /// - [`TransformError::UnknownDataset`] if no settings are registered
    /// - [`TransformError::MissingColumns`] if the category or value column is absent
    /// - [`TransformError::EmptyTable`] if the table has no rows
    /// - [`TransformError::NumericCoercion`] if a value cell is not numeric
    pub fn transform(&self, dataset_name: &str, table: &SourceTable) -> Result<MetricTable> {
        let settings = self
            .dataset(dataset_name)
            .ok_or_else(|| TransformError::UnknownDataset {
                dataset: dataset_name.to_string(),
            })?;

        let (category_idx, value_idx) = required_columns(settings, table)?;
        if table.is_empty() {
            return Err(TransformError::EmptyTable {
                dataset: settings.name.clone(),
            });
        }

        let values = table
            .column_values(value_idx)
            .enumerate()
            .map(|(row, raw)| {
                transform_to_numeric(raw).map_err(|raw| TransformError::NumericCoercion {
                    dataset: settings.name.clone(),
                    column: settings.value_field.clone(),
                    row,
                    value: raw.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let percentage = optional_numeric(settings, table, settings.percentage_field.as_deref());
        let highlight_value = optional_numeric(settings, table, settings.highlight_field.as_deref());
        let highlight_percentage = optional_numeric(
            settings,
            table,
            settings.highlight_percentage_field.as_deref(),
        );

        let records = table
            .column_values(category_idx)
            .zip(values)
            .enumerate()
            .map(|(row, (category, value))| MetricRecord {
                metric_group: settings.metric_group.clone(),
                category: category.to_string(),
                value,
                percentage: cell_at(percentage.as_deref(), row),
                highlight_value: cell_at(highlight_value.as_deref(), row),
                highlight_percentage: cell_at(highlight_percentage.as_deref(), row),
            })
            .collect();

        Ok(MetricTable::new(records))
    }
}

/// Locate the category and value columns, reporting every missing one.
fn required_columns(settings: &DatasetSettings, table: &SourceTable) -> Result<(usize, usize)> {
    match (
        table.column_index(&settings.category_field),
        table.column_index(&settings.value_field),
    ) {
        (Some(category_idx), Some(value_idx)) => Ok((category_idx, value_idx)),
        _ => {
            let missing: BTreeSet<String> = settings
                .required_columns()
                .into_iter()
                .filter(|column| !table.has_column(column))
                .map(str::to_string)
                .collect();
            Err(TransformError::MissingColumns {
                dataset: settings.name.clone(),
                columns: missing.into_iter().collect(),
            })
        }
    }
}

/// Leniently parse an optional column; `None` when unset or absent.
fn optional_numeric(
    settings: &DatasetSettings,
    table: &SourceTable,
    column: Option<&str>,
) -> Option<Vec<Option<f64>>> {
    let column = column?;
    let Some(idx) = table.column_index(column) else {
        debug!(
            dataset = %settings.name,
            column,
            "optional column not present; field will be empty"
        );
        return None;
    };

    let parsed: Vec<Option<f64>> = table.column_values(idx).map(parse_numeric).collect();
    let coerced = table
        .column_values(idx)
        .zip(&parsed)
        .filter(|(raw, value)| value.is_none() && !raw.trim().is_empty())
        .count();
    if coerced > 0 {
        debug!(
            dataset = %settings.name,
            column,
            coerced,
            "non-numeric cells coerced to empty"
        );
    }
    Some(parsed)
}

fn cell_at(column: Option<&[Option<f64>]>, row: usize) -> Option<f64> {
    column.and_then(|values| values.get(row).copied().flatten())
}
