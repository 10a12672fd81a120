//! valida-stats - Statistical primitives for analytical method validation
//!
//! This crate provides the numeric building blocks used by the validation
//! engine and the chart adapters:
//!
//! - **Descriptive**: mean and Bessel-corrected standard deviation
//! - **Regression**: ordinary least-squares fit of y on x with Pearson r
//! - **ANOVA**: one-way analysis of variance with F-test p-value
//! - **Histogram**: equal-width binning over the data range
//! - **Boxplot**: quartiles, 1.5·IQR whiskers and outliers
//!
//! Every function validates its input and returns a [`StatsError`] rather
//! than letting NaN or infinity leak into results.

pub mod anova;
pub mod boxplot;
pub mod error;
pub mod histogram;
pub mod regression;
pub mod summary;

pub use anova::*;
pub use boxplot::*;
pub use error::*;
pub use histogram::*;
pub use regression::*;
pub use summary::*;
