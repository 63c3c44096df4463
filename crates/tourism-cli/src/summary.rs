use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tourism_core::PipelineResult;

pub fn print_summary(result: &PipelineResult) {
    if let Some(project) = result.metadata.get("project") {
        println!("Project: {project}");
    }
    println!("{}", summary_table(result));
    println!("{}", summary_line(result));
}

/// One-line run summary.
pub fn summary_line(result: &PipelineResult) -> String {
    format!(
        "Generated {} rows across {} datasets.",
        result.total_rows(),
        result.dataset_count()
    )
}

pub fn summary_table(result: &PipelineResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Rows"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in &result.outputs {
        table.add_row(vec![
            Cell::new(&output.dataset_name).fg(Color::Green),
            count_cell(output.row_count),
            Cell::new(output.path.display()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use tourism_core::DatasetOutput;
    use tourism_model::CombinedTable;

    fn result() -> PipelineResult {
        PipelineResult {
            combined: CombinedTable::default(),
            metadata: BTreeMap::from([("project".to_string(), "Test".to_string())]),
            outputs: vec![
                DatasetOutput {
                    dataset_name: "regiones".to_string(),
                    path: PathBuf::from("processed/regiones.csv"),
                    row_count: 0,
                },
                DatasetOutput {
                    dataset_name: "tipos".to_string(),
                    path: PathBuf::from("processed/tipos.csv"),
                    row_count: 0,
                },
            ],
        }
    }

    #[test]
    fn summary_line_counts_rows_and_datasets() {
        assert_eq!(summary_line(&result()), "Generated 0 rows across 2 datasets.");
    }

    #[test]
    fn summary_table_lists_each_dataset_and_total() {
        let mut table = summary_table(&result());
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(rendered.contains("regiones"));
        assert!(rendered.contains("tipos"));
        assert!(rendered.contains("TOTAL"));
        assert_eq!(table.row_count(), 3);
    }
}
