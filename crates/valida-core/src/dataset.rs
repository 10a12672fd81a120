//! Validation dataset
//!
//! A dataset is the required `value` series plus up to three optional
//! columns. Blanks are an independent series; concentrations and group
//! labels are paired with values index-for-index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use valida_io::{ColumnType, DataColumn, DataTable};

use crate::error::{DatasetError, DatasetResult};

/// Column names used to locate each series in a table
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub value: String,
    pub blank: String,
    pub concentration: String,
    pub group: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            value: "value".to_string(),
            blank: "blank".to_string(),
            concentration: "concentration".to_string(),
            group: "group".to_string(),
        }
    }
}

impl ColumnNames {
    /// Spanish laboratory headers (`valor`, `blanco`, `concentracion`, `grupo`)
    pub fn spanish() -> Self {
        Self {
            value: "valor".to_string(),
            blank: "blanco".to_string(),
            concentration: "concentracion".to_string(),
            group: "grupo".to_string(),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "english" | "default" => Some(Self::default()),
            "spanish" => Some(Self::spanish()),
            _ => None,
        }
    }
}

/// Measurement series for one validation run
///
/// Concentration and group cells are kept per value row, with `None` for an
/// empty cell; the engine decides which rows each block can use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    values: Vec<f64>,
    blank: Option<Vec<f64>>,
    concentration: Option<Vec<Option<f64>>>,
    group: Option<Vec<Option<String>>>,
}

impl Dataset {
    /// Create a dataset from the value series alone
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    /// Attach blank measurements (any length)
    pub fn with_blank(mut self, blank: Vec<f64>) -> Self {
        self.blank = Some(blank);
        self
    }

    /// Attach concentrations, one per value
    pub fn with_concentration(self, concentration: Vec<f64>) -> DatasetResult<Self> {
        self.with_concentration_cells(concentration.into_iter().map(Some).collect())
    }

    /// Attach concentration cells, one per value, `None` where empty
    pub fn with_concentration_cells(
        mut self,
        concentration: Vec<Option<f64>>,
    ) -> DatasetResult<Self> {
        self.check_paired("concentration", concentration.len())?;
        self.concentration = Some(concentration);
        Ok(self)
    }

    /// Attach group labels, one per value
    pub fn with_group<S: Into<String>>(self, group: Vec<S>) -> DatasetResult<Self> {
        self.with_group_cells(group.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Attach group cells, one per value, `None` where empty
    pub fn with_group_cells(mut self, group: Vec<Option<String>>) -> DatasetResult<Self> {
        self.check_paired("group", group.len())?;
        self.group = Some(group);
        Ok(self)
    }

    fn check_paired(&self, field: &str, actual: usize) -> DatasetResult<()> {
        if actual != self.values.len() {
            return Err(DatasetError::LengthMismatch {
                field: field.to_string(),
                expected: self.values.len(),
                actual,
            });
        }
        Ok(())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn blank(&self) -> Option<&[f64]> {
        self.blank.as_deref()
    }

    pub fn concentration(&self) -> Option<&[Option<f64>]> {
        self.concentration.as_deref()
    }

    pub fn group(&self) -> Option<&[Option<String>]> {
        self.group.as_deref()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(concentration, value)` pairs for the rows with a concentration
    pub fn calibration_pairs(&self) -> Option<Vec<(f64, f64)>> {
        let concentration = self.concentration.as_ref()?;
        Some(
            concentration
                .iter()
                .zip(&self.values)
                .filter_map(|(c, &v)| c.map(|c| (c, v)))
                .collect(),
        )
    }

    /// Partition values by group label
    ///
    /// Labels are ordered lexicographically; values keep their original
    /// relative order within each group. Rows without a label are left out.
    pub fn groups(&self) -> Option<BTreeMap<&str, Vec<f64>>> {
        let labels = self.group.as_ref()?;
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (label, &value) in labels.iter().zip(&self.values) {
            if let Some(label) = label {
                groups.entry(label.as_str()).or_default().push(value);
            }
        }
        Some(groups)
    }

    /// Extract a dataset from a loaded table
    ///
    /// - The value column is required and must be numeric.
    /// - Rows with an empty value cell are skipped.
    /// - Blanks are read from every numeric cell of the blank column,
    ///   independently of the values.
    /// - Concentration and group cells are kept for every row that has a
    ///   value, empty or not.
    ///
    /// Text cells in the blank and concentration columns (`n.d.`, `<LOD`)
    /// are treated as empty, so a column that holds no number at all still
    /// yields a dataset and leaves its block to the engine.
    pub fn from_table(table: &DataTable, names: &ColumnNames) -> DatasetResult<Self> {
        let value_column = table
            .column(&names.value)
            .ok_or_else(|| DatasetError::FieldNotFound {
                field: names.value.clone(),
            })?;
        let value_cells = value_column
            .as_f64()
            .ok_or_else(|| DatasetError::TypeMismatch {
                field: names.value.clone(),
                expected: ColumnType::Float64.name().to_string(),
                actual: value_column.dtype().name().to_string(),
            })?;

        let used_rows: Vec<usize> = value_cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|_| i))
            .collect();
        let skipped = value_cells.len() - used_rows.len();
        if skipped > 0 {
            tracing::warn!(
                column = %names.value,
                skipped,
                "skipping rows with an empty value cell"
            );
        }

        let mut dataset = Dataset::new(value_cells.iter().flatten().copied().collect());

        if let Some(column) = table.column(&names.blank) {
            let cells = lenient_numbers(&names.blank, column);
            dataset.blank = Some(cells.into_iter().flatten().collect());
        }

        if let Some(column) = table.column(&names.concentration) {
            let cells = lenient_numbers(&names.concentration, column);
            dataset.concentration = Some(
                used_rows
                    .iter()
                    .map(|&row| cells.get(row).copied().flatten())
                    .collect(),
            );
        }

        if let Some(column) = table.column(&names.group) {
            let labels = column.to_labels();
            dataset.group = Some(
                used_rows
                    .iter()
                    .map(|&row| labels.get(row).cloned().flatten())
                    .collect(),
            );
        }

        tracing::debug!(
            values = dataset.len(),
            blank = dataset.blank.is_some(),
            concentration = dataset.concentration.is_some(),
            group = dataset.group.is_some(),
            "extracted dataset"
        );
        Ok(dataset)
    }
}

fn lenient_numbers(field: &str, column: &DataColumn) -> Vec<Option<f64>> {
    let numbers = column.to_numbers();
    let ignored = column
        .to_labels()
        .iter()
        .zip(&numbers)
        .filter(|(label, number)| label.is_some() && number.is_none())
        .count();
    if ignored > 0 {
        tracing::warn!(column = %field, ignored, "ignoring non-numeric cells");
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<(&str, DataColumn)>) -> DataTable {
        DataTable::from_columns(
            columns
                .into_iter()
                .map(|(name, col)| (name.to_string(), col))
                .collect(),
        )
    }

    fn floats(values: &[Option<f64>]) -> DataColumn {
        DataColumn::Float64(values.to_vec())
    }

    #[test]
    fn test_builder_length_checks() {
        let ds = Dataset::new(vec![1.0, 2.0, 3.0]);
        assert!(ds.clone().with_concentration(vec![1.0, 2.0]).is_err());
        assert_eq!(
            ds.with_group(vec!["a", "b"]).unwrap_err(),
            DatasetError::LengthMismatch {
                field: "group".to_string(),
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_groups_keep_order() {
        let ds = Dataset::new(vec![1.0, 2.0, 3.0, 4.0])
            .with_group(vec!["b", "a", "b", "a"])
            .unwrap();
        let groups = ds.groups().unwrap();
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(groups["a"], vec![2.0, 4.0]);
        assert_eq!(groups["b"], vec![1.0, 3.0]);
    }

    #[test]
    fn test_no_group_column() {
        assert!(Dataset::new(vec![1.0, 2.0]).groups().is_none());
    }

    #[test]
    fn test_from_table_values_only() {
        let t = table(vec![("value", floats(&[Some(1.0), Some(2.0)]))]);
        let ds = Dataset::from_table(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.values(), &[1.0, 2.0]);
        assert!(ds.blank().is_none());
        assert!(ds.concentration().is_none());
        assert!(ds.group().is_none());
    }

    #[test]
    fn test_from_table_spanish_headers() {
        let t = table(vec![
            ("valor", floats(&[Some(10.0), Some(11.0), None])),
            ("blanco", floats(&[Some(0.1), None, Some(0.3)])),
            ("concentracion", floats(&[Some(1.0), Some(2.0), None])),
            (
                "grupo",
                DataColumn::String(vec!["A".into(), "B".into(), "".into()]),
            ),
        ]);
        let ds = Dataset::from_table(&t, &ColumnNames::spanish()).unwrap();

        // The third row has no value and is skipped for paired columns
        assert_eq!(ds.values(), &[10.0, 11.0]);
        assert_eq!(ds.concentration().unwrap(), &[Some(1.0), Some(2.0)]);
        assert_eq!(
            ds.group().unwrap(),
            &[Some("A".to_string()), Some("B".to_string())]
        );
        // Blanks are independent of the value rows
        assert_eq!(ds.blank().unwrap(), &[0.1, 0.3]);
    }

    #[test]
    fn test_from_table_is_case_sensitive() {
        let t = table(vec![("Value", floats(&[Some(1.0)]))]);
        assert_eq!(
            Dataset::from_table(&t, &ColumnNames::default()).unwrap_err(),
            DatasetError::FieldNotFound {
                field: "value".to_string()
            }
        );
    }

    #[test]
    fn test_from_table_text_values_rejected() {
        let t = table(vec![("value", DataColumn::String(vec!["high".into()]))]);
        assert!(matches!(
            Dataset::from_table(&t, &ColumnNames::default()),
            Err(DatasetError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_table_keeps_empty_paired_cells() {
        let t = table(vec![
            ("value", floats(&[Some(10.0), Some(10.2), Some(9.8)])),
            ("concentration", floats(&[Some(1.0), Some(2.0), None])),
            (
                "group",
                DataColumn::String(vec!["A".into(), "".into(), "B".into()]),
            ),
        ]);
        let ds = Dataset::from_table(&t, &ColumnNames::default()).unwrap();

        assert_eq!(ds.concentration().unwrap(), &[Some(1.0), Some(2.0), None]);
        assert_eq!(ds.calibration_pairs().unwrap(), vec![(1.0, 10.0), (2.0, 10.2)]);
        let groups = ds.groups().unwrap();
        assert_eq!(groups["A"], vec![10.0]);
        assert_eq!(groups["B"], vec![9.8]);
    }

    #[test]
    fn test_from_table_empty_blank_column() {
        let t = table(vec![
            ("value", floats(&[Some(10.0), Some(10.2), Some(9.8)])),
            (
                "blank",
                DataColumn::String(vec![String::new(), String::new(), String::new()]),
            ),
        ]);
        let ds = Dataset::from_table(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.blank(), Some(&[][..]));
    }

    #[test]
    fn test_from_table_text_blank_cells_ignored() {
        let t = table(vec![
            ("value", floats(&[Some(10.0), Some(10.2), Some(9.8)])),
            (
                "blank",
                DataColumn::String(vec!["0.01".into(), "n.d.".into(), "0.03".into()]),
            ),
        ]);
        let ds = Dataset::from_table(&t, &ColumnNames::default()).unwrap();
        assert_eq!(ds.blank().unwrap(), &[0.01, 0.03]);
    }

    #[test]
    fn test_numeric_group_labels() {
        let t = table(vec![
            ("value", floats(&[Some(1.0), Some(2.0)])),
            ("group", floats(&[Some(1.0), Some(2.0)])),
        ]);
        let ds = Dataset::from_table(&t, &ColumnNames::default()).unwrap();
        assert_eq!(
            ds.group().unwrap(),
            &[Some("1".to_string()), Some("2".to_string())]
        );
    }

    #[test]
    fn test_presets() {
        assert_eq!(ColumnNames::preset("spanish"), Some(ColumnNames::spanish()));
        assert_eq!(ColumnNames::preset("default"), Some(ColumnNames::default()));
        assert!(ColumnNames::preset("klingon").is_none());
    }
}
