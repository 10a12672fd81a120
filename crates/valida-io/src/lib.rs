//! valida-io - Tabular data input for method validation
//!
//! This crate loads the measurement table a validation run starts from:
//!
//! - **CSV**: Comma-separated values with type inference
//! - **TSV**: Tab-separated values, same inference rules
//! - **Excel**: First worksheet of xlsx/xlsm/xls/ods workbooks (`excel` feature)
//!
//! # Design
//!
//! All readers implement the `DataReader` trait for uniform access and
//! deliver a fully materialized [`DataTable`]. Validation datasets are
//! small, so nothing is loaded lazily.

pub mod reader;
pub mod schema;

#[cfg(feature = "csv")]
pub mod csv_reader;

#[cfg(feature = "excel")]
pub mod excel_reader;

pub use reader::*;
pub use schema::*;
