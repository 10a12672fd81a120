//! valida-core - Analytical method validation engine
//!
//! This crate turns a measurement dataset and a certified reference value
//! into a [`ValidationReport`].
//!
//! # Key Components
//!
//! - **Dataset**: the `value` series plus optional `blank`, `concentration`
//!   and `group` columns, extracted from a loaded table by [`ColumnNames`]
//! - **Engine**: [`compute_report`], a pure function over its inputs
//! - **Report**: every metric and verdict, with optional blocks modelled as
//!   `Option<Metric<_>>` so "column absent", "not computable" and
//!   "computed" stay distinguishable
//! - **Config**: column names, block toggles and report settings loaded
//!   from TOML or JSON
//!
//! # Metrics
//!
//! - Trueness: mean, bias, bias %
//! - Precision: sample standard deviation, RSD %
//! - Uncertainty: standard and expanded (k = 2)
//! - Sensitivity: mean / reference
//! - Detection limits: LOD = 3·sd(blank), LOQ = 10·sd(blank)
//! - Linearity: OLS R², accepted at R² ≥ 0.995
//! - Robustness: one-way ANOVA, robust at p ≥ 0.05

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod report;

pub use config::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use report::*;
