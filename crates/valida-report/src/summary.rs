//! Fixed-precision text summary of a validation report
//!
//! Every present metric becomes one [`SummaryLine`]. Unavailable metrics
//! and absent blocks are left out entirely; they never show up as `NaN`
//! or as a placeholder.

use serde::{Deserialize, Serialize};
use valida_core::ValidationReport;

/// Decimals for mean, bias, SD, uncertainties, LOD, LOQ and line coefficients
pub const VALUE_DECIMALS: usize = 6;
/// Decimals for percentages
pub const PERCENT_DECIMALS: usize = 3;
/// Decimals for sensitivity and the F-statistic
pub const SENSITIVITY_DECIMALS: usize = 4;
/// Decimals for R² and the ANOVA p-value
pub const PROBABILITY_DECIMALS: usize = 5;

pub const LINEAR_RANGE_ACCEPTED: &str = "Linear range accepted";
pub const LINEAR_RANGE_REJECTED: &str = "Linear range rejected";
pub const METHOD_ROBUST: &str = "Method robust (no significant differences)";
pub const METHOD_NOT_ROBUST: &str = "Method NOT robust";

/// One labelled row of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Format `value` with a fixed number of decimals, never printing `-0.000`
pub fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

/// Verdict text for the linearity block
pub fn linearity_verdict(accepted: bool) -> &'static str {
    if accepted {
        LINEAR_RANGE_ACCEPTED
    } else {
        LINEAR_RANGE_REJECTED
    }
}

/// Verdict text for the robustness block
pub fn robustness_verdict(robust: bool) -> &'static str {
    if robust {
        METHOD_ROBUST
    } else {
        METHOD_NOT_ROBUST
    }
}

/// Build the summary rows for every present metric
pub fn summary_lines(report: &ValidationReport) -> Vec<SummaryLine> {
    let mut lines = vec![
        SummaryLine::new("n", report.n.to_string()),
        SummaryLine::new("Reference value", fixed(report.reference_value, VALUE_DECIMALS)),
        SummaryLine::new("Mean", fixed(report.mean, VALUE_DECIMALS)),
        SummaryLine::new("Bias", fixed(report.bias, VALUE_DECIMALS)),
    ];

    if let Some(pct) = report.bias_pct.value() {
        lines.push(SummaryLine::new("Bias (%)", fixed(pct, PERCENT_DECIMALS)));
    }

    lines.push(SummaryLine::new("SD", fixed(report.sd, VALUE_DECIMALS)));
    if let Some(pct) = report.rsd_pct.value() {
        lines.push(SummaryLine::new("RSD (%)", fixed(pct, PERCENT_DECIMALS)));
    }

    lines.push(SummaryLine::new(
        "Standard uncertainty (u)",
        fixed(report.standard_uncertainty, VALUE_DECIMALS),
    ));
    lines.push(SummaryLine::new(
        "Expanded uncertainty (U, k=2)",
        fixed(report.expanded_uncertainty, VALUE_DECIMALS),
    ));

    if let Some(s) = report.sensitivity.value() {
        lines.push(SummaryLine::new("Sensitivity", fixed(s, SENSITIVITY_DECIMALS)));
    }

    if let Some(limits) = report.detection_limits() {
        lines.push(SummaryLine::new("LOD", fixed(limits.lod, VALUE_DECIMALS)));
        lines.push(SummaryLine::new("LOQ", fixed(limits.loq, VALUE_DECIMALS)));
    }

    if let Some(lin) = report.linearity() {
        lines.push(SummaryLine::new("Slope", fixed(lin.slope, VALUE_DECIMALS)));
        lines.push(SummaryLine::new("Intercept", fixed(lin.intercept, VALUE_DECIMALS)));
        lines.push(SummaryLine::new("R²", fixed(lin.r_squared, PROBABILITY_DECIMALS)));
        lines.push(SummaryLine::new(
            "Linearity",
            linearity_verdict(lin.linear_range_accepted).to_string(),
        ));
    }

    if let Some(rob) = report.robustness() {
        if let Some(f) = rob.f_statistic {
            lines.push(SummaryLine::new("F", fixed(f, SENSITIVITY_DECIMALS)));
        }
        lines.push(SummaryLine::new(
            "p-value (ANOVA)",
            fixed(rob.p_value, PROBABILITY_DECIMALS),
        ));
        lines.push(SummaryLine::new(
            "Robustness",
            robustness_verdict(rob.robust).to_string(),
        ));
    }

    lines
}

/// Plain-text rendering of [`summary_lines`], one `label: value` per line
pub fn format_summary(report: &ValidationReport) -> String {
    summary_lines(report)
        .iter()
        .map(|line| format!("{}\n", line))
        .collect()
}
