//! Per-dataset field mapping configuration.

use serde::{Deserialize, Serialize};

/// How one configured dataset maps onto the metric schema.
///
/// `category_field` and `value_field` are required column names. The three
/// optional fields may be unset, or may name a column the source table does
/// not have; either way the corresponding output field is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// Dataset identifier (the key in the settings file).
    pub name: String,
    /// Source file name, relative to the raw data directory.
    pub filename: String,
    /// Constant label applied to every record of this dataset.
    pub metric_group: String,
    pub category_field: String,
    pub value_field: String,
    #[serde(default)]
    pub percentage_field: Option<String>,
    #[serde(default)]
    pub highlight_field: Option<String>,
    #[serde(default)]
    pub highlight_percentage_field: Option<String>,
}

impl DatasetSettings {
    /// Create settings with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        metric_group: impl Into<String>,
        category_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            metric_group: metric_group.into(),
            category_field: category_field.into(),
            value_field: value_field.into(),
            percentage_field: None,
            highlight_field: None,
            highlight_percentage_field: None,
        }
    }

    #[must_use]
    pub fn with_percentage_field(mut self, column: impl Into<String>) -> Self {
        self.percentage_field = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_highlight_field(mut self, column: impl Into<String>) -> Self {
        self.highlight_field = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_highlight_percentage_field(mut self, column: impl Into<String>) -> Self {
        self.highlight_percentage_field = Some(column.into());
        self
    }

    /// The two columns a source table must contain.
    pub fn required_columns(&self) -> [&str; 2] {
        [self.category_field.as_str(), self.value_field.as_str()]
    }
}
