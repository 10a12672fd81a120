//! Table → report → summary/document/PDF, without the CLI

use rstest::rstest;
use valida_core::{compute_report, ColumnNames, Dataset, EngineOptions, ReportSettings, ValidationReport};
use valida_io::{csv_reader::CsvReader, DataReader};
use valida_report::{summary_lines, ChartSet, ReportDocument};

/// Exact calibration `value = 2·concentration` with blanks and two analysts
const CALIBRATION_TSV: &str = "\
valor\tblanco\tconcentracion\tgrupo
2\t0.010\t1\tA
4\t0.012\t2\tA
6\t0.011\t3\tB
8\t\t4\tB
";

fn load() -> (Dataset, ValidationReport) {
    let table = CsvReader::from_reader(CALIBRATION_TSV.as_bytes(), b'\t')
        .unwrap()
        .read_table()
        .unwrap();
    let dataset = Dataset::from_table(&table, &ColumnNames::spanish()).unwrap();
    let report = compute_report(&dataset, 5.0, &EngineOptions::default()).unwrap();
    (dataset, report)
}

fn line(report: &ValidationReport, label: &str) -> Option<String> {
    summary_lines(report)
        .into_iter()
        .find(|l| l.label == label)
        .map(|l| l.value)
}

#[rstest]
#[case("Mean", "5.000000")]
#[case("Bias", "0.000000")]
#[case("Bias (%)", "0.000")]
#[case("Sensitivity", "1.0000")]
#[case("Slope", "2.000000")]
#[case("R²", "1.00000")]
#[case("LOD", "0.003000")]
#[case("LOQ", "0.010000")]
#[case("Linearity", "Linear range accepted")]
fn test_summary_precision(#[case] label: &str, #[case] expected: &str) {
    let (_, report) = load();
    assert_eq!(line(&report, label).as_deref(), Some(expected));
}

#[test]
fn test_document_from_table() {
    let (dataset, report) = load();
    let charts = ChartSet::build(&dataset, &report, 10).unwrap();
    assert!(charts.calibration.is_some());

    let document = ReportDocument::build(&report, Some(&charts), &ReportSettings::default());
    assert!(document
        .lines
        .iter()
        .any(|l| l.to_string() == "Linearity: Linear range accepted"));
    assert_eq!(document.source.matches("#figure(").count(), 3);
}

#[cfg(feature = "typst-render")]
#[test]
fn test_pdf_report_from_table() {
    use valida_report::{default_renderer, export_pdf, RenderOptions};

    let (dataset, report) = load();
    let charts = ChartSet::build(&dataset, &report, 10).unwrap();
    let document = ReportDocument::build(&report, Some(&charts), &ReportSettings::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(ReportSettings::default().pdf_file_name);
    let file = export_pdf(&document, default_renderer().as_ref(), &RenderOptions::default(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(bytes.len(), file.size);
}
