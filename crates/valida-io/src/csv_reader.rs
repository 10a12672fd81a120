//! CSV file reader with type inference

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{DataColumn, DataTable};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
///
/// The file is parsed once on open; datasets for method validation are a
/// few hundred rows at most.
pub struct CsvReader {
    table: DataTable,
    delimiter: u8,
}

impl CsvReader {
    /// Open a comma-separated file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_delimiter(path, b',')
    }

    /// Open a delimited file
    pub fn open_with_delimiter(path: &str, delimiter: u8) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let reader = Self::from_reader(BufReader::new(file), delimiter)?;
        tracing::debug!(
            path,
            rows = reader.table.num_rows(),
            columns = reader.table.schema.num_columns(),
            "parsed delimited file"
        );
        Ok(reader)
    }

    /// Parse delimited text from any reader (header row required)
    pub fn from_reader<R: Read>(input: R, delimiter: u8) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if headers.is_empty() {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
            for (i, column) in cells.iter_mut().enumerate() {
                column.push(record.get(i).unwrap_or_default().to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| (name, DataColumn::from_text_cells(&values)))
            .collect();

        Ok(Self {
            table: DataTable::from_columns(columns),
            delimiter,
        })
    }
}

impl DataReader for CsvReader {
    fn read_table(&self) -> IoResult<DataTable> {
        Ok(self.table.clone())
    }

    fn format_name(&self) -> &'static str {
        match self.delimiter {
            b'\t' => "TSV",
            _ => "CSV",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;
    use std::io::Write;

    #[test]
    fn test_from_reader_ragged_rows() {
        let input = "value,blank,group\n10.1,0.2,A\n10.3,,B\n9.9\n";
        let reader = CsvReader::from_reader(input.as_bytes(), b',').unwrap();
        let table = reader.read_table().unwrap();

        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_names(), vec!["value", "blank", "group"]);
        assert_eq!(
            table.column("blank").unwrap().as_f64().unwrap(),
            &[Some(0.2), None, None]
        );
        assert_eq!(table.column("group").unwrap().dtype(), ColumnType::String);
        assert_eq!(reader.format_name(), "CSV");
    }

    #[test]
    fn test_open_tsv_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "value\tconcentration").unwrap();
        writeln!(file, "2.0\t1").unwrap();
        writeln!(file, "4.0\t2").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let reader = crate::reader::open_file(&path).unwrap();
        assert_eq!(reader.format_name(), "TSV");
        let table = reader.read_table().unwrap();
        let column = table.column("concentration").unwrap();
        assert_eq!(column.as_f64().unwrap(), &[Some(1.0), Some(2.0)]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvReader::open("/nonexistent/data.csv"),
            Err(IoError::FileNotFound(_))
        ));
    }
}
