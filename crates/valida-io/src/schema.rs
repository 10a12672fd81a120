//! Schema, column and table types for loaded measurement data

use serde::{Deserialize, Serialize};

/// Schema describing the structure of a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors, in file order
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Get column index by exact (case-sensitive) name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as it appears in the header
    pub name: String,

    /// Inferred data type
    pub dtype: ColumnType,

    /// Number of empty cells
    pub missing: usize,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            missing: 0,
        }
    }

    /// Set the number of empty cells
    pub fn with_missing(mut self, missing: usize) -> Self {
        self.missing = missing;
        self
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every non-empty cell parses as a number
    Float64,
    /// Free text (categorical labels)
    String,
}

impl ColumnType {
    /// Infer the type of a column from its text cells
    ///
    /// A column is numeric when it has at least one non-empty cell and every
    /// non-empty cell parses as a float.
    pub fn infer(cells: &[String]) -> Self {
        let mut non_empty = cells.iter().filter(|s| !s.is_empty()).peekable();
        if non_empty.peek().is_none() {
            return ColumnType::String;
        }
        if non_empty.all(|s| s.parse::<f64>().is_ok()) {
            ColumnType::Float64
        } else {
            ColumnType::String
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
        }
    }
}

/// A column of data
///
/// Empty numeric cells are `None`; empty text cells are empty strings.
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float64(Vec<Option<f64>>),
    String(Vec<String>),
}

impl DataColumn {
    /// Build a column from text cells, typed by [`ColumnType::infer`]
    pub fn from_text_cells(cells: &[String]) -> Self {
        match ColumnType::infer(cells) {
            ColumnType::Float64 => DataColumn::Float64(
                cells
                    .iter()
                    .map(|s| if s.is_empty() { None } else { s.parse().ok() })
                    .collect(),
            ),
            ColumnType::String => DataColumn::String(cells.to_vec()),
        }
    }

    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric cells, `None` for empty cells (numeric columns only)
    pub fn as_f64(&self) -> Option<&[Option<f64>]> {
        match self {
            DataColumn::Float64(v) => Some(v),
            DataColumn::String(_) => None,
        }
    }

    /// Cells read as numbers wherever possible
    ///
    /// Unlike [`as_f64`](Self::as_f64) this accepts text columns too: each
    /// text cell that parses as a float is kept, anything else is `None`.
    pub fn to_numbers(&self) -> Vec<Option<f64>> {
        match self {
            DataColumn::Float64(v) => v.clone(),
            DataColumn::String(v) => v.iter().map(|s| s.trim().parse().ok()).collect(),
        }
    }

    /// Cells as categorical labels, `None` for empty cells
    ///
    /// Numeric cells are rendered with their shortest round-trip form, so a
    /// group column of `1, 2, 1` yields the labels `"1"`, `"2"`, `"1"`.
    pub fn to_labels(&self) -> Vec<Option<String>> {
        match self {
            DataColumn::Float64(v) => v.iter().map(|c| c.map(|x| x.to_string())).collect(),
            DataColumn::String(v) => v
                .iter()
                .map(|s| if s.is_empty() { None } else { Some(s.clone()) })
                .collect(),
        }
    }

    /// Text rendering of one cell for display
    pub fn display_cell(&self, row: usize) -> String {
        match self {
            DataColumn::Float64(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| x.to_string())
                .unwrap_or_default(),
            DataColumn::String(v) => v.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// A fully loaded table
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column layout
    pub schema: DataSchema,

    /// Column data, parallel to `schema.columns`
    pub columns: Vec<DataColumn>,
}

impl DataTable {
    /// Assemble a table from named columns
    ///
    /// The record count is taken from the longest column.
    pub fn from_columns(columns: Vec<(String, DataColumn)>) -> Self {
        let num_records = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let (descriptors, data): (Vec<_>, Vec<_>) = columns
            .into_iter()
            .map(|(name, col)| {
                let missing = col.to_labels().iter().filter(|c| c.is_none()).count();
                (
                    ColumnDescriptor::new(name, col.dtype()).with_missing(missing),
                    col,
                )
            })
            .unzip();

        Self {
            schema: DataSchema::new(descriptors, num_records),
            columns: data,
        }
    }

    /// Get a column by exact (case-sensitive) name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.schema.column_index(name).map(|i| &self.columns[i])
    }

    /// Detected column names, in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.schema.num_records
    }

    /// Display strings for one row, in column order
    pub fn row(&self, index: usize) -> Vec<String> {
        self.columns.iter().map(|c| c.display_cell(index)).collect()
    }
}
