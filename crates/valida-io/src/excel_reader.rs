//! Spreadsheet reader (xlsx, xlsm, xls, ods)
//!
//! Reads the first worksheet through `calamine`. The first row is the
//! header; every cell is rendered to text and typed with the same inference
//! the delimited reader uses, so a workbook and its CSV export load into
//! the same table.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{DataColumn, DataTable};

/// Reader for the first worksheet of a workbook
pub struct ExcelReader {
    table: DataTable,
}

impl ExcelReader {
    /// Open a workbook, format detected from the extension
    pub fn open(path: &str) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let sheet = workbook.sheet_names().first().cloned().unwrap_or_default();
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IoError::InvalidFormat("workbook has no worksheets".to_string()))?
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?;

        let table = table_from_rows(range.rows())?;
        tracing::debug!(
            path,
            sheet = %sheet,
            rows = table.num_rows(),
            columns = table.schema.num_columns(),
            "parsed worksheet"
        );
        Ok(Self { table })
    }
}

impl DataReader for ExcelReader {
    fn read_table(&self) -> IoResult<DataTable> {
        Ok(self.table.clone())
    }

    fn format_name(&self) -> &'static str {
        "Excel"
    }
}

fn table_from_rows<'a, I>(mut rows: I) -> IoResult<DataTable>
where
    I: Iterator<Item = &'a [Data]>,
{
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| IoError::InvalidFormat("missing header row".to_string()))?
        .iter()
        .map(cell_text)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IoError::InvalidFormat("missing header row".to_string()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(row.get(i).map(cell_text).unwrap_or_default());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| (name, DataColumn::from_text_cells(&values)))
        .collect();
    Ok(DataTable::from_columns(columns))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
