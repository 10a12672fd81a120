//! Typst source for the report document

use serde::{Deserialize, Serialize};
use valida_core::{ReportSettings, ValidationReport};

use crate::charts::{Chart, ChartSet, ChartSize};
use crate::summary::{summary_lines, SummaryLine};

/// A report ready to hand to a renderer
///
/// Carries the Typst source together with the summary rows it was laid
/// out from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub lines: Vec<SummaryLine>,
    pub source: String,
}

impl ReportDocument {
    /// Lay out the summary table followed by the charts (if any)
    pub fn build(report: &ValidationReport, charts: Option<&ChartSet>, settings: &ReportSettings) -> Self {
        let lines = summary_lines(report);

        let mut source = format!("= {}\n\n", escape_markup(&settings.title));
        source.push_str(&summary_table(&lines));

        if let Some(charts) = charts.filter(|_| settings.include_charts) {
            source.push_str("\n== Charts\n\n");
            for chart in charts.charts() {
                source.push_str(&chart.to_typst(ChartSize::default()));
                source.push('\n');
            }
        }

        Self {
            title: settings.title.clone(),
            lines,
            source,
        }
    }

    /// Standalone document holding a single chart, sized to its content
    pub fn for_chart(chart: &dyn Chart) -> Self {
        let source = format!(
            "#set page(width: auto, height: auto, margin: 8pt)\n{}",
            chart.to_typst(ChartSize::default())
        );
        Self {
            title: chart.caption(),
            lines: Vec::new(),
            source,
        }
    }
}

fn summary_table(lines: &[SummaryLine]) -> String {
    let mut table = String::from("#table(\n  columns: 2,\n  stroke: none,\n  align: (left, right),\n");
    for line in lines {
        table.push_str(&format!(
            "  [{}], [{}],\n",
            escape_markup(&line.label),
            escape_markup(&line.value)
        ));
    }
    table.push_str(")\n");
    table
}

/// Escape characters with markup meaning in Typst content blocks
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '#' | '*' | '_' | '`' | '$' | '[' | ']' | '<' | '>' | '@' | '~' | '='
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
