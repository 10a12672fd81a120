//! Measurement tables used across integration tests

use valida_io::{csv_reader::CsvReader, DataReader, DataTable};

/// Ten replicate measurements of a 10.00 mg/L certified reference material,
/// with blanks, a five-level calibration and two analysts.
pub const FULL_RUN_CSV: &str = "\
value,blank,concentration,group
10.02,0.011,2,A
9.98,0.013,4,A
10.05,0.009,6,A
10.01,0.012,8,A
9.97,0.010,10,A
10.03,,2,B
9.99,,4,B
10.04,,6,B
10.00,,8,B
9.96,,10,B
";

/// The same replicates with Spanish headers and no optional columns
pub const SPANISH_VALUES_ONLY_CSV: &str = "\
valor
10.02
9.98
10.05
";

pub fn parse_table(csv: &str) -> DataTable {
    CsvReader::from_reader(csv.as_bytes(), b',')
        .expect("fixture parses")
        .read_table()
        .expect("fixture table")
}

/// Blank column present in the header but never filled in
pub const EMPTY_BLANK_CSV: &str = "\
value,blank
10.0,
10.2,
9.8,
";

/// Blank column with a text entry for a non-detect
pub const TEXT_BLANK_CSV: &str = "\
value,blank
10.0,0.010
10.2,n.d.
9.8,0.014
10.1,0.012
";

/// Concentration given for the calibration rows only
pub const PARTIAL_CALIBRATION_CSV: &str = "\
value,concentration,group
10.0,1,A
10.2,2,A
9.8,,B
10.1,,
";
