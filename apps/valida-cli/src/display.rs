//! Terminal tables for the loaded data and the results

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use valida_core::{ColumnNames, ValidationReport};
use valida_io::DataTable;
use valida_report::summary_lines;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// First `max_rows` rows of the loaded table
pub fn table_preview(data: &DataTable, max_rows: usize) -> Table {
    let mut table = new_table();
    table.set_header(data.column_names());
    for row in 0..data.num_rows().min(max_rows) {
        table.add_row(data.row(row));
    }
    table
}

/// Which series, if any, each detected column is read as
pub fn column_role(name: &str, names: &ColumnNames) -> &'static str {
    if name == names.value {
        "value"
    } else if name == names.blank {
        "blank"
    } else if name == names.concentration {
        "concentration"
    } else if name == names.group {
        "group"
    } else {
        "-"
    }
}

/// Detected columns with type, missing cells and role
pub fn detected_columns(data: &DataTable, names: &ColumnNames) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Column", "Type", "Missing", "Used as"]);
    for column in &data.schema.columns {
        table.add_row(vec![
            column.name.clone(),
            column.dtype.name().to_string(),
            column.missing.to_string(),
            column_role(&column.name, names).to_string(),
        ]);
    }
    table
}

/// Summary rows of the report
pub fn results_table(report: &ValidationReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Result"]);
    for line in summary_lines(report) {
        table.add_row(vec![line.label, line.value]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use valida_core::{compute_report, Dataset, EngineOptions};
    use valida_io::DataColumn;

    fn sample() -> DataTable {
        DataTable::from_columns(vec![
            (
                "valor".to_string(),
                DataColumn::Float64(vec![Some(10.01), Some(9.99), None]),
            ),
            (
                "lote".to_string(),
                DataColumn::String(vec!["A".into(), "B".into(), "A".into()]),
            ),
        ])
    }

    #[test]
    fn test_preview_limits_rows() {
        let rendered = table_preview(&sample(), 1).to_string();
        assert!(rendered.contains("valor"));
        assert!(rendered.contains("10.01"));
        assert!(!rendered.contains("9.99"));
    }

    #[test]
    fn test_column_roles() {
        let names = ColumnNames::spanish();
        assert_eq!(column_role("valor", &names), "value");
        assert_eq!(column_role("grupo", &names), "group");
        assert_eq!(column_role("lote", &names), "-");

        let rendered = detected_columns(&sample(), &names).to_string();
        assert!(rendered.contains("float64"));
    }

    #[test]
    fn test_results_table_lists_metrics() {
        let ds = Dataset::new(vec![10.0; 4]);
        let report = compute_report(&ds, 10.0, &EngineOptions::default()).unwrap();
        let rendered = results_table(&report).to_string();
        assert!(rendered.contains("Mean"));
        assert!(rendered.contains("10.000000"));
        assert!(!rendered.contains("LOD"));
    }
}
