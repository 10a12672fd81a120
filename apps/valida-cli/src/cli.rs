//! CLI argument parsing for valida

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use valida_core::{ColumnNames, ConfigError, ValidaConfig};
use valida_report::{PageSize, RenderOptions};

/// Column-name preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnPreset {
    /// value, blank, concentration, group
    English,
    /// valor, blanco, concentracion, grupo
    Spanish,
}

impl ColumnPreset {
    pub fn names(self) -> ColumnNames {
        match self {
            ColumnPreset::English => ColumnNames::default(),
            ColumnPreset::Spanish => ColumnNames::spanish(),
        }
    }
}

/// Paper size of the PDF report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Paper {
    #[default]
    A4,
    Letter,
}

impl Paper {
    pub fn page_size(self) -> PageSize {
        match self {
            Paper::A4 => PageSize::A4,
            Paper::Letter => PageSize::Letter,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "valida")]
#[command(version)]
#[command(about = "Analytical method validation statistics and PDF report", long_about = None)]
pub struct Cli {
    /// Measurement table (.csv, .tsv, .xlsx, .xls, .ods)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Certified reference value (overrides the config file)
    #[arg(short, long, value_name = "VALUE", allow_negative_numbers = true)]
    pub reference: Option<f64>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Column-name preset
    #[arg(long, value_enum, value_name = "PRESET")]
    pub columns: Option<ColumnPreset>,

    /// Name of the value column
    #[arg(long, value_name = "NAME")]
    pub value_column: Option<String>,

    /// Name of the blank column
    #[arg(long, value_name = "NAME")]
    pub blank_column: Option<String>,

    /// Name of the concentration column
    #[arg(long, value_name = "NAME")]
    pub concentration_column: Option<String>,

    /// Name of the group column
    #[arg(long, value_name = "NAME")]
    pub group_column: Option<String>,

    /// Where to write the PDF report [default: ./validation_report.pdf]
    #[arg(short = 'o', long = "pdf", value_name = "PATH", conflicts_with = "no_pdf")]
    pub pdf: Option<PathBuf>,

    /// Skip the PDF report
    #[arg(long)]
    pub no_pdf: bool,

    /// Paper size of the PDF report
    #[arg(long, value_enum, value_name = "SIZE", default_value_t = Paper::A4)]
    pub paper: Paper,

    /// Write the charts into this directory
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Rows of the loaded table to preview
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub preview_rows: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied, validated
    pub fn resolve_config(&self) -> Result<ValidaConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ValidaConfig::load(path)?,
            None => ValidaConfig::default(),
        };

        if let Some(reference) = self.reference {
            config.reference_value = reference;
        }
        if let Some(preset) = self.columns {
            config.columns = preset.names();
        }

        let columns = &mut config.columns;
        let overrides = [
            (&mut columns.value, &self.value_column),
            (&mut columns.blank, &self.blank_column),
            (&mut columns.concentration, &self.concentration_column),
            (&mut columns.group, &self.group_column),
        ];
        for (slot, name) in overrides {
            if let Some(name) = name {
                *slot = name.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Render options for the PDF report and charts
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_page_size(self.paper.page_size())
    }

    /// Destination of the PDF report, `None` with `--no-pdf`
    pub fn pdf_path(&self, config: &ValidaConfig) -> Option<PathBuf> {
        if self.no_pdf {
            return None;
        }
        Some(
            self.pdf
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.report.pdf_file_name)),
        )
    }
}
