//! The normalized metric schema.
//!
//! A [`MetricTable`] is what the schema mapper produces for one dataset. The
//! orchestrator tags it with the dataset identifier ([`DatasetFrame`]) and
//! concatenates all tagged frames into a [`CombinedTable`].

use serde::Serialize;

/// Column order used for every metric output.
pub const METRIC_COLUMNS: [&str; 6] = [
    "metric_group",
    "category",
    "value",
    "percentage",
    "highlight_value",
    "highlight_percentage",
];

/// Name of the column carrying the dataset identifier.
pub const DATASET_NAME_COLUMN: &str = "dataset_name";

/// One normalized metric row.
///
/// `value` is always present. The optional numeric fields are `None` when the
/// source column is not configured, missing, or holds an unparsable cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub metric_group: String,
    pub category: String,
    pub value: f64,
    pub percentage: Option<f64>,
    pub highlight_value: Option<f64>,
    pub highlight_percentage: Option<f64>,
}

/// Metric records for a single dataset, in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    pub records: Vec<MetricRecord>,
}

impl MetricTable {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A dataset's metric table tagged with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetFrame {
    pub dataset_name: String,
    pub table: MetricTable,
}

impl DatasetFrame {
    pub fn new(dataset_name: impl Into<String>, table: MetricTable) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            table,
        }
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Records paired with this frame's dataset identifier.
    pub fn tagged_records(&self) -> impl Iterator<Item = (&str, &MetricRecord)> + '_ {
        self.table
            .records
            .iter()
            .map(move |record| (self.dataset_name.as_str(), record))
    }
}

/// A metric record carrying the identifier of the dataset it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedRecord {
    #[serde(flatten)]
    pub record: MetricRecord,
    pub dataset_name: String,
}

/// All datasets of a run, concatenated in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    pub rows: Vec<TaggedRecord>,
}

impl CombinedTable {
    /// Concatenate frames in the order given.
    pub fn concat<'a>(frames: impl IntoIterator<Item = &'a DatasetFrame>) -> Self {
        let rows = frames
            .into_iter()
            .flat_map(DatasetFrame::tagged_records)
            .map(|(dataset_name, record)| TaggedRecord {
                record: record.clone(),
                dataset_name: dataset_name.to_string(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows paired with their dataset identifier.
    pub fn tagged_records(&self) -> impl Iterator<Item = (&str, &MetricRecord)> + '_ {
        self.rows
            .iter()
            .map(|row| (row.dataset_name.as_str(), &row.record))
    }
}
