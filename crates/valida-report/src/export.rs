//! Report export
//!
//! Every file is written through a [`tempfile::NamedTempFile`] in the
//! destination directory and then persisted to its final name in one
//! rename. If any step fails the temporary is dropped and removed, so a
//! half-written report never appears at the destination.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::charts::ChartSet;
use crate::document::ReportDocument;
use crate::error::{ReportError, ReportResult};
use crate::render::{DocumentRenderer, OutputFormat, RenderOptions, RenderOutput};

/// MIME type of the exported report
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Export format for reports and charts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// PDF report
    Pdf,
    /// SVG chart
    Svg,
    /// Typst source, for charts when the renderer is unavailable
    Typst,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
            ExportFormat::Typst => "typ",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => PDF_MIME_TYPE,
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Typst => "text/plain",
        }
    }

    /// `base` with this format's extension
    pub fn suggested_filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.extension())
    }
}

/// A file written by an export
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Size in bytes
    pub size: usize,
}

/// Write `bytes` to `path` via a temporary file in the same directory
pub fn write_atomically(path: &Path, bytes: &[u8]) -> ReportResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Render `document` to PDF and write it to `path`
pub fn export_pdf(
    document: &ReportDocument,
    renderer: &dyn DocumentRenderer,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> ReportResult<ExportedFile> {
    let path = path.as_ref();
    let options = options.clone().with_format(OutputFormat::Pdf);
    let bytes = match renderer.render(document, &options)? {
        RenderOutput::Pdf(bytes) => bytes,
        other => {
            return Err(ReportError::UnexpectedOutput {
                expected: OutputFormat::Pdf.name(),
                actual: other.format().name(),
            })
        }
    };

    write_atomically(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        backend = renderer.backend_name(),
        "wrote PDF report"
    );
    Ok(ExportedFile {
        path: path.to_path_buf(),
        format: ExportFormat::Pdf,
        size: bytes.len(),
    })
}

/// Write each chart into `dir`
///
/// Charts are rendered to `<name>.svg` when the renderer is available,
/// otherwise their Typst markup is written to `<name>.typ`.
pub fn export_charts(
    charts: &ChartSet,
    renderer: &dyn DocumentRenderer,
    options: &RenderOptions,
    dir: impl AsRef<Path>,
) -> ReportResult<Vec<ExportedFile>> {
    let dir = dir.as_ref();
    let svg_options = options.clone().with_format(OutputFormat::Svg);
    let mut written = Vec::new();

    for chart in charts.charts() {
        let document = ReportDocument::for_chart(chart);
        let (format, bytes) = if renderer.is_available() {
            match renderer.render(&document, &svg_options)? {
                RenderOutput::Svg(pages) => (
                    ExportFormat::Svg,
                    pages.into_iter().next().unwrap_or_default().into_bytes(),
                ),
                other => {
                    return Err(ReportError::UnexpectedOutput {
                        expected: OutputFormat::Svg.name(),
                        actual: other.format().name(),
                    })
                }
            }
        } else {
            (ExportFormat::Typst, document.source.into_bytes())
        };

        let path = dir.join(format.suggested_filename(chart.name()));
        write_atomically(&path, &bytes)?;
        tracing::debug!(path = %path.display(), chart = chart.name(), "wrote chart");
        written.push(ExportedFile {
            path,
            format,
            size: bytes.len(),
        });
    }

    tracing::info!(count = written.len(), dir = %dir.display(), "exported charts");
    Ok(written)
}
