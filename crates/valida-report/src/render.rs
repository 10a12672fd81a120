//! Document rendering
//!
//! Rendering is built around the [`DocumentRenderer`] trait. The backend,
//! `DefaultTypstRenderer`, compiles the document's Typst source with
//! `typst-as-lib`, charts included, to PDF or SVG.
//!
//! # Feature Flag
//!
//! The Typst backend is behind the `typst-render` feature flag due to the
//! heavyweight dependencies involved. Without it a stub renderer with the
//! same name reports itself unavailable and fails every render with
//! [`RenderError::FeatureNotEnabled`].

use thiserror::Error;

use crate::document::ReportDocument;

/// Errors that can occur during rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Typst compilation failed with source errors
    #[error("Typst compilation error: {0}")]
    CompilationError(String),

    /// PDF generation failed after successful compilation
    #[error("PDF generation error: {0}")]
    PdfError(String),

    /// The requested output needs the typst-render feature
    #[error("{0} output requires the 'typst-render' feature")]
    FeatureNotEnabled(&'static str),
}

/// Paper sizes offered for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
}

impl PageSize {
    /// Get the width in points
    pub fn width_pt(&self) -> f64 {
        match self {
            PageSize::A4 => 595.28,    // 210mm in points
            PageSize::Letter => 612.0, // 8.5 * 72
        }
    }

    /// Get the height in points
    pub fn height_pt(&self) -> f64 {
        match self {
            PageSize::A4 => 841.89,    // 297mm in points
            PageSize::Letter => 792.0, // 11 * 72
        }
    }
}

/// Output format for rendered documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// PDF output (default)
    #[default]
    Pdf,
    /// One SVG per page
    Svg,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Svg => "SVG",
        }
    }
}

/// Render options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size for the document
    pub page_size: PageSize,

    /// Base font size in points (default: 11pt)
    pub font_size: f64,

    /// Page margins in points (top, right, bottom, left)
    pub margins: (f64, f64, f64, f64),

    /// Output format to generate
    pub output_format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            font_size: 11.0,
            margins: (72.0, 72.0, 72.0, 72.0), // 1 inch margins
            output_format: OutputFormat::Pdf,
        }
    }
}

impl RenderOptions {
    /// Set the paper size
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Generate a Typst page setup preamble based on these options
    pub fn to_typst_preamble(&self) -> String {
        format!(
            r#"#set page(
  width: {}pt,
  height: {}pt,
  margin: (top: {}pt, right: {}pt, bottom: {}pt, left: {}pt),
)
#set text(size: {}pt)
"#,
            self.page_size.width_pt(),
            self.page_size.height_pt(),
            self.margins.0,
            self.margins.1,
            self.margins.2,
            self.margins.3,
            self.font_size
        )
    }
}

/// Result of rendering a document
#[derive(Debug)]
pub enum RenderOutput {
    /// PDF document bytes
    Pdf(Vec<u8>),
    /// One SVG string per page
    Svg(Vec<String>),
}

impl RenderOutput {
    /// Get the output as PDF bytes, if this is a PDF output
    pub fn as_pdf(&self) -> Option<&[u8]> {
        match self {
            RenderOutput::Pdf(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Get the output as SVG strings, if this is an SVG output
    pub fn as_svg(&self) -> Option<&[String]> {
        match self {
            RenderOutput::Svg(svgs) => Some(svgs),
            _ => None,
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            RenderOutput::Pdf(_) => OutputFormat::Pdf,
            RenderOutput::Svg(_) => OutputFormat::Svg,
        }
    }
}

/// Renderer trait for report documents
pub trait DocumentRenderer: Send + Sync {
    /// Render a report document with the given options
    fn render(
        &self,
        document: &ReportDocument,
        options: &RenderOptions,
    ) -> Result<RenderOutput, RenderError>;

    /// Check if rendering is available in this build
    fn is_available(&self) -> bool;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Renderer compiled into this build
pub fn default_renderer() -> Box<dyn DocumentRenderer> {
    Box::new(DefaultTypstRenderer::new())
}

// ============================================================================
// Typst implementation (when typst-render feature is enabled)
// ============================================================================

#[cfg(feature = "typst-render")]
mod typst_impl {
    use super::*;

    /// Typst renderer using typst-as-lib
    #[derive(Debug, Default)]
    pub struct DefaultTypstRenderer {}

    impl DefaultTypstRenderer {
        pub fn new() -> Self {
            Self {}
        }
    }

    impl DocumentRenderer for DefaultTypstRenderer {
        fn render(
            &self,
            document: &ReportDocument,
            options: &RenderOptions,
        ) -> Result<RenderOutput, RenderError> {
            use typst_as_lib::{typst_kit_options::TypstKitFontOptions, TypstEngine};

            let full_source = format!("{}\n{}", options.to_typst_preamble(), document.source);

            let engine = TypstEngine::builder()
                .main_file(full_source.as_str())
                .search_fonts_with(
                    TypstKitFontOptions::default()
                        .include_system_fonts(true)
                        .include_embedded_fonts(true),
                )
                .build();

            let compiled = engine.compile();
            for warning in &compiled.warnings {
                tracing::warn!(?warning, "typst warning");
            }

            let compiled_doc = compiled
                .output
                .map_err(|e| RenderError::CompilationError(format!("{:?}", e)))?;

            match options.output_format {
                OutputFormat::Pdf => {
                    let pdf_options = typst_pdf::PdfOptions::default();
                    let pdf_bytes = typst_pdf::pdf(&compiled_doc, &pdf_options)
                        .map_err(|e| RenderError::PdfError(format!("{:?}", e)))?;
                    Ok(RenderOutput::Pdf(pdf_bytes))
                }
                OutputFormat::Svg => Ok(RenderOutput::Svg(
                    compiled_doc
                        .pages
                        .iter()
                        .map(|page| typst_svg::svg(page))
                        .collect(),
                )),
            }
        }

        fn is_available(&self) -> bool {
            true
        }

        fn backend_name(&self) -> &'static str {
            "typst 0.14"
        }
    }
}

#[cfg(feature = "typst-render")]
pub use typst_impl::DefaultTypstRenderer;

// ============================================================================
// Stub implementation (when typst-render feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "typst-render"))]
mod stub_impl {
    use super::*;

    /// Stub renderer for builds without the `typst-render` feature
    ///
    /// Every render fails with [`RenderError::FeatureNotEnabled`].
    #[derive(Debug, Default)]
    pub struct DefaultTypstRenderer {
        _private: (),
    }

    impl DefaultTypstRenderer {
        pub fn new() -> Self {
            Self { _private: () }
        }
    }

    impl DocumentRenderer for DefaultTypstRenderer {
        fn render(
            &self,
            _document: &ReportDocument,
            options: &RenderOptions,
        ) -> Result<RenderOutput, RenderError> {
            Err(RenderError::FeatureNotEnabled(options.output_format.name()))
        }

        fn is_available(&self) -> bool {
            false
        }

        fn backend_name(&self) -> &'static str {
            "none (typst-render disabled)"
        }
    }
}

#[cfg(not(feature = "typst-render"))]
pub use stub_impl::DefaultTypstRenderer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryLine;

    fn document() -> ReportDocument {
        ReportDocument {
            title: "Method Validation Report".to_string(),
            lines: vec![SummaryLine {
                label: "Mean".to_string(),
                value: "10.000000".to_string(),
            }],
            source: "= Method Validation Report\n\nMean: 10.000000\n".to_string(),
        }
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::default()
            .with_page_size(PageSize::Letter)
            .with_format(OutputFormat::Svg);

        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.font_size, 11.0);
        assert_eq!(options.output_format, OutputFormat::Svg);
    }

    #[test]
    fn test_page_size_dimensions() {
        let a4 = PageSize::A4;
        assert!((a4.width_pt() - 595.28).abs() < 0.01);
        assert!((a4.height_pt() - 841.89).abs() < 0.01);
        assert_eq!(PageSize::default(), PageSize::A4);
        assert_eq!(PageSize::Letter.width_pt(), 612.0);
    }

    #[test]
    fn test_typst_preamble_generation() {
        let preamble = RenderOptions::default().to_typst_preamble();
        assert!(preamble.contains("#set page("));
        assert!(preamble.contains("width: 595.28pt"));
        assert!(preamble.contains("#set text(size: 11pt)"));

        let letter = RenderOptions::default()
            .with_page_size(PageSize::Letter)
            .to_typst_preamble();
        assert!(letter.contains("height: 792pt"));
    }

    #[test]
    fn test_render_output_accessors() {
        let pdf = RenderOutput::Pdf(vec![1, 2, 3]);
        assert!(pdf.as_pdf().is_some());
        assert!(pdf.as_svg().is_none());
        assert_eq!(pdf.format(), OutputFormat::Pdf);

        let svg = RenderOutput::Svg(vec!["<svg></svg>".to_string()]);
        assert!(svg.as_svg().is_some());
    }

    #[cfg(feature = "typst-render")]
    #[test]
    fn test_typst_renders_pdf_and_svg() {
        let renderer = default_renderer();
        assert!(renderer.is_available());

        let pdf = renderer
            .render(&document(), &RenderOptions::default())
            .unwrap();
        assert!(pdf.as_pdf().unwrap().starts_with(b"%PDF"));

        let options = RenderOptions::default().with_format(OutputFormat::Svg);
        let svg = renderer.render(&document(), &options).unwrap();
        let pages = svg.as_svg().unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("<svg"));
    }

    #[cfg(feature = "typst-render")]
    #[test]
    fn test_typst_reports_source_errors() {
        let mut broken = document();
        broken.source = "#let x = (".to_string();
        assert!(matches!(
            default_renderer().render(&broken, &RenderOptions::default()),
            Err(RenderError::CompilationError(_))
        ));
    }

    #[cfg(not(feature = "typst-render"))]
    #[test]
    fn test_stub_renderer_unavailable() {
        let renderer = default_renderer();
        assert!(!renderer.is_available());
        assert!(matches!(
            renderer.render(&document(), &RenderOptions::default()),
            Err(RenderError::FeatureNotEnabled("PDF"))
        ));
    }
}
