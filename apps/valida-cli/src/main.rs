//! valida - Method validation from the command line
//!
//! Loads a measurement table, prints the detected columns and the
//! validation summary, and writes the PDF report.

mod cli;
mod display;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use valida_core::{compute_report, Dataset};
use valida_report::{default_renderer, export_charts, export_pdf, ChartSet, ReportDocument};

use cli::Cli;

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config()?;

    let path = cli.file.to_string_lossy();
    let reader = valida_io::open_file(&path)?;
    let table = reader.read_table()?;
    tracing::info!(
        file = %path,
        format = reader.format_name(),
        rows = table.num_rows(),
        columns = table.schema.num_columns(),
        "loaded table"
    );

    if !cli.json {
        println!("{}", display::table_preview(&table, cli.preview_rows));
        println!("Detected columns: {}", table.column_names().join(", "));
        println!("{}", display::detected_columns(&table, &config.columns));
    }

    let dataset = Dataset::from_table(&table, &config.columns)?;
    let report = compute_report(&dataset, config.reference_value, &config.engine)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", display::results_table(&report));
    }

    let charts = ChartSet::build(&dataset, &report, config.report.histogram_bins)?;
    let renderer = default_renderer();
    let options = cli.render_options();
    tracing::debug!(backend = renderer.backend_name(), "selected renderer");

    if let Some(dir) = &cli.charts {
        std::fs::create_dir_all(dir)?;
        for file in export_charts(&charts, renderer.as_ref(), &options, dir)? {
            if !cli.json {
                println!("Chart written to {}", file.path.display());
            }
        }
    }

    if let Some(pdf) = cli.pdf_path(&config) {
        if !renderer.is_available() {
            tracing::warn!(
                path = %pdf.display(),
                "skipping the PDF report: built without the typst-render feature"
            );
            return Ok(());
        }
        let document = ReportDocument::build(&report, Some(&charts), &config.report);
        let file = export_pdf(&document, renderer.as_ref(), &options, &pdf)?;
        if !cli.json {
            println!("Report written to {} ({})", file.path.display(), file.format.mime_type());
        }
    }

    Ok(())
}
