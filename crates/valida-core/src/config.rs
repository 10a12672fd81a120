//! Configuration for valida
//!
//! Groups the knobs a validation run exposes: which table columns hold
//! which series, which optional blocks to compute, and how the report is
//! laid out. The statistical thresholds themselves are constants in
//! [`crate::report`] and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dataset::ColumnNames;
use crate::engine::EngineOptions;
use crate::error::ConfigError;

/// Default file name of the exported PDF report
pub const DEFAULT_PDF_FILE_NAME: &str = "validation_report.pdf";

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidaConfig {
    /// Certified reference value used when none is given on the command line
    pub reference_value: f64,
    /// Table column names
    pub columns: ColumnNames,
    /// Optional metric blocks
    pub engine: EngineOptions,
    /// Report layout
    pub report: ReportSettings,
}

/// Report layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title printed at the top of the summary
    pub title: String,
    /// Number of equal-width bins in the values histogram
    pub histogram_bins: usize,
    /// File name of the exported PDF
    pub pdf_file_name: String,
    /// Whether charts are embedded in the PDF
    pub include_charts: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Method Validation Report".to_string(),
            histogram_bins: valida_stats::DEFAULT_HISTOGRAM_BINS,
            pdf_file_name: DEFAULT_PDF_FILE_NAME.to_string(),
            include_charts: true,
        }
    }
}

impl ValidaConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a config file; `.json` files are parsed as JSON,
    /// anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_toml(&text)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference_value.is_finite() {
            return Err(ConfigError::OutOfRange(
                "reference_value must be finite".to_string(),
            ));
        }

        if self.report.histogram_bins == 0 {
            return Err(ConfigError::OutOfRange(
                "histogram_bins must be positive".to_string(),
            ));
        }

        if self.report.pdf_file_name.trim().is_empty() {
            return Err(ConfigError::OutOfRange(
                "pdf_file_name must not be empty".to_string(),
            ));
        }

        let c = &self.columns;
        let names = [&c.value, &c.blank, &c.concentration, &c.group];
        if names.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::OutOfRange(
                "column names must not be empty".to_string(),
            ));
        }
        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                return Err(ConfigError::Conflict(format!(
                    "column name '{}' is mapped to more than one series",
                    a
                )));
            }
        }

        Ok(())
    }
}
