//! valida-report - Rendering adapters for validation reports
//!
//! Turns a [`valida_core::ValidationReport`] into something a person reads:
//!
//! - **Summary**: one fixed-precision row per available metric plus the
//!   linearity and robustness verdict texts
//! - **Charts**: histogram, boxplot and calibration scatter geometry, drawn
//!   as Typst markup
//! - **Document**: Typst source combining the summary table and charts
//! - **Render**: the [`DocumentRenderer`] trait and its Typst backend,
//!   compiled in with the `typst-render` feature
//! - **Export**: PDF and chart files written through scoped temporary files
//!
//! Nothing here computes statistics beyond chart geometry; unavailable
//! metrics are omitted rather than printed.

pub mod charts;
pub mod document;
pub mod error;
pub mod export;
pub mod render;
pub mod summary;

pub use charts::{BoxplotChart, CalibrationChart, Chart, ChartSet, ChartSize, FittedLine, HistogramChart};
pub use document::{escape_markup, ReportDocument};
pub use error::{ReportError, ReportResult};
pub use export::{export_charts, export_pdf, write_atomically, ExportFormat, ExportedFile, PDF_MIME_TYPE};
pub use render::{
    default_renderer, DefaultTypstRenderer, DocumentRenderer, OutputFormat, PageSize,
    RenderError, RenderOptions, RenderOutput,
};
pub use summary::{format_summary, summary_lines, SummaryLine};
