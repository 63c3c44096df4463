//! Conversion of metric records into Polars DataFrames.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use tourism_model::{
    CombinedTable, DATASET_NAME_COLUMN, DatasetFrame, METRIC_COLUMNS, MetricRecord,
};

use crate::error::Result;

/// Build the output frame for one tagged dataset.
pub fn dataset_dataframe(frame: &DatasetFrame) -> Result<DataFrame> {
    metric_dataframe(frame.tagged_records(), frame.row_count())
}

/// Build the output frame for the combined table.
pub fn combined_dataframe(combined: &CombinedTable) -> Result<DataFrame> {
    metric_dataframe(combined.tagged_records(), combined.len())
}

/// Lay tagged records out column-wise.
///
/// Columns follow [`METRIC_COLUMNS`] with [`DATASET_NAME_COLUMN`] last.
/// Absent optional values become nulls.
fn metric_dataframe<'a>(
    rows: impl Iterator<Item = (&'a str, &'a MetricRecord)>,
    capacity: usize,
) -> Result<DataFrame> {
    let mut metric_group = Vec::with_capacity(capacity);
    let mut category = Vec::with_capacity(capacity);
    let mut value = Vec::with_capacity(capacity);
    let mut percentage = Vec::with_capacity(capacity);
    let mut highlight_value = Vec::with_capacity(capacity);
    let mut highlight_percentage = Vec::with_capacity(capacity);
    let mut dataset_name = Vec::with_capacity(capacity);

    for (name, record) in rows {
        metric_group.push(record.metric_group.clone());
        category.push(record.category.clone());
        value.push(record.value);
        percentage.push(record.percentage);
        highlight_value.push(record.highlight_value);
        highlight_percentage.push(record.highlight_percentage);
        dataset_name.push(name.to_string());
    }

    let [
        metric_group_col,
        category_col,
        value_col,
        percentage_col,
        highlight_value_col,
        highlight_percentage_col,
    ] = METRIC_COLUMNS;

    let columns: Vec<Column> = vec![
        Series::new(metric_group_col.into(), metric_group).into_column(),
        Series::new(category_col.into(), category).into_column(),
        Series::new(value_col.into(), value).into_column(),
        Series::new(percentage_col.into(), percentage).into_column(),
        Series::new(highlight_value_col.into(), highlight_value).into_column(),
        Series::new(highlight_percentage_col.into(), highlight_percentage).into_column(),
        Series::new(DATASET_NAME_COLUMN.into(), dataset_name).into_column(),
    ];
    Ok(DataFrame::new(columns)?)
}
