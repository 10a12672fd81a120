//! Diagnostic charts
//!
//! Each chart is plain geometry computed from the dataset and the report
//! (histogram bins, boxplot quartiles, fitted-line endpoints) and knows how
//! to draw itself as Typst markup. No statistics beyond that geometry are
//! computed here.

use valida_core::{Dataset, ValidationReport};
use valida_stats::{BoxplotSummary, Histogram};

use crate::document::escape_markup;
use crate::error::{ReportError, ReportResult};

const BAR_FILL: &str = "rgb(\"#4c72b0\")";
const LINE_STROKE: &str = "1pt + rgb(\"#c44e52\")";
const AXIS_STROKE: &str = "0.5pt + black";
const POINT_RADIUS: f64 = 2.0;

/// Chart box size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 200.0,
        }
    }
}

/// A chart that can be embedded in the report document
pub trait Chart {
    /// Short identifier, used for exported file names
    fn name(&self) -> &'static str;

    /// Caption printed under the chart
    fn caption(&self) -> String;

    /// Typst markup drawing the chart as a captioned figure
    fn to_typst(&self, size: ChartSize) -> String;
}

/// Histogram of the value series
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub histogram: Histogram,
}

impl HistogramChart {
    pub fn new(values: &[f64], bins: usize) -> ReportResult<Self> {
        let histogram = Histogram::from_data(values, bins).map_err(|source| ReportError::Chart {
            chart: "histogram",
            source,
        })?;
        Ok(Self { histogram })
    }
}

impl Chart for HistogramChart {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn caption(&self) -> String {
        format!("Histogram of values ({} bins)", self.histogram.num_bins())
    }

    fn to_typst(&self, size: ChartSize) -> String {
        let edges = &self.histogram.edges;
        let x_range = (edges[0], edges[edges.len() - 1]);
        let y_range = (0.0, self.histogram.max_count().max(1) as f64);
        let mut plot = Plot::new(size, x_range, y_range);

        for (i, &count) in self.histogram.counts.iter().enumerate() {
            if count > 0 {
                plot.bar(edges[i], edges[i + 1], 0.0, count as f64);
            }
        }
        plot.finish(&self.caption())
    }
}

/// Box-and-whisker plot of the value series
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotChart {
    pub summary: BoxplotSummary,
}

impl BoxplotChart {
    pub fn new(values: &[f64]) -> ReportResult<Self> {
        let summary = BoxplotSummary::from_data(values).map_err(|source| ReportError::Chart {
            chart: "boxplot",
            source,
        })?;
        Ok(Self { summary })
    }
}

impl Chart for BoxplotChart {
    fn name(&self) -> &'static str {
        "boxplot"
    }

    fn caption(&self) -> String {
        "Boxplot of values".to_string()
    }

    fn to_typst(&self, size: ChartSize) -> String {
        let s = &self.summary;
        let mut plot = Plot::new(size, (0.0, 1.0), (s.plot_min(), s.plot_max()));

        plot.bar(0.3, 0.7, s.q1, s.q3);
        plot.segment((0.3, s.median), (0.7, s.median), "1.5pt + black");
        plot.segment((0.5, s.q3), (0.5, s.upper_whisker), AXIS_STROKE);
        plot.segment((0.5, s.q1), (0.5, s.lower_whisker), AXIS_STROKE);
        plot.segment((0.4, s.upper_whisker), (0.6, s.upper_whisker), AXIS_STROKE);
        plot.segment((0.4, s.lower_whisker), (0.6, s.lower_whisker), AXIS_STROKE);
        for &o in &s.outliers {
            plot.point(0.5, o);
        }
        plot.finish(&self.caption())
    }
}

/// Fitted calibration line over the concentration range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// Scatter of (concentration, value) with the fitted line when available
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationChart {
    pub points: Vec<(f64, f64)>,
    pub line: Option<FittedLine>,
}

impl CalibrationChart {
    /// `None` when the dataset has no concentration column or no row with
    /// a concentration
    pub fn new(dataset: &Dataset, report: &ValidationReport) -> Option<Self> {
        let points = dataset.calibration_pairs()?;
        if points.is_empty() {
            return None;
        }

        let line = report.linearity().map(|lin| {
            let (x0, x1) = bounds(points.iter().map(|p| p.0));
            FittedLine {
                slope: lin.slope,
                intercept: lin.intercept,
                start: (x0, lin.predict(x0)),
                end: (x1, lin.predict(x1)),
            }
        });

        Some(Self { points, line })
    }
}

impl Chart for CalibrationChart {
    fn name(&self) -> &'static str {
        "calibration"
    }

    fn caption(&self) -> String {
        match &self.line {
            Some(line) => format!(
                "Calibration: y = {:.4}x + {:.4}",
                line.slope, line.intercept
            ),
            None => "Calibration (no fitted line)".to_string(),
        }
    }

    fn to_typst(&self, size: ChartSize) -> String {
        let x_range = bounds(self.points.iter().map(|p| p.0));
        let line_ys = self.line.iter().flat_map(|l| [l.start.1, l.end.1]);
        let y_range = bounds(self.points.iter().map(|p| p.1).chain(line_ys));
        let mut plot = Plot::new(size, x_range, y_range);

        for &(x, y) in &self.points {
            plot.point(x, y);
        }
        if let Some(line) = &self.line {
            plot.segment(line.start, line.end, LINE_STROKE);
        }
        plot.finish(&self.caption())
    }
}

/// Every chart drawn for one report
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub histogram: HistogramChart,
    pub boxplot: BoxplotChart,
    pub calibration: Option<CalibrationChart>,
}

impl ChartSet {
    pub fn build(
        dataset: &Dataset,
        report: &ValidationReport,
        histogram_bins: usize,
    ) -> ReportResult<Self> {
        Ok(Self {
            histogram: HistogramChart::new(dataset.values(), histogram_bins)?,
            boxplot: BoxplotChart::new(dataset.values())?,
            calibration: CalibrationChart::new(dataset, report),
        })
    }

    /// Charts in document order
    pub fn charts(&self) -> Vec<&dyn Chart> {
        let mut charts: Vec<&dyn Chart> = vec![&self.histogram, &self.boxplot];
        if let Some(calibration) = &self.calibration {
            charts.push(calibration);
        }
        charts
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Maps data coordinates into a fixed-size box and collects Typst elements
struct Plot {
    size: ChartSize,
    x: (f64, f64),
    y: (f64, f64),
    body: String,
}

impl Plot {
    const LEFT: f64 = 48.0;
    const RIGHT: f64 = 8.0;
    const TOP: f64 = 8.0;
    const BOTTOM: f64 = 20.0;

    fn new(size: ChartSize, x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            size,
            x: widen(x),
            y: widen(y),
            body: String::new(),
        }
    }

    fn inner_width(&self) -> f64 {
        self.size.width - Self::LEFT - Self::RIGHT
    }

    fn inner_height(&self) -> f64 {
        self.size.height - Self::TOP - Self::BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        Self::LEFT + (x - self.x.0) / (self.x.1 - self.x.0) * self.inner_width()
    }

    fn py(&self, y: f64) -> f64 {
        Self::TOP + (1.0 - (y - self.y.0) / (self.y.1 - self.y.0)) * self.inner_height()
    }

    fn bar(&mut self, x0: f64, x1: f64, y0: f64, y1: f64) {
        let (left, right) = (self.px(x0), self.px(x1));
        let (top, bottom) = (self.py(y1), self.py(y0));
        self.body.push_str(&format!(
            "    #place(top + left, dx: {:.2}pt, dy: {:.2}pt, rect(width: {:.2}pt, height: {:.2}pt, fill: {}, stroke: 0.4pt + white))\n",
            left,
            top,
            (right - left).max(0.0),
            (bottom - top).max(0.0),
            BAR_FILL
        ));
    }

    fn segment(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str) {
        self.body.push_str(&format!(
            "    #place(top + left, line(start: ({:.2}pt, {:.2}pt), end: ({:.2}pt, {:.2}pt), stroke: {}))\n",
            self.px(from.0),
            self.py(from.1),
            self.px(to.0),
            self.py(to.1),
            stroke
        ));
    }

    fn point(&mut self, x: f64, y: f64) {
        self.body.push_str(&format!(
            "    #place(top + left, dx: {:.2}pt, dy: {:.2}pt, circle(radius: {}pt, fill: black))\n",
            self.px(x) - POINT_RADIUS,
            self.py(y) - POINT_RADIUS,
            POINT_RADIUS
        ));
    }

    fn label(&mut self, dx: f64, dy: f64, text: &str) {
        self.body.push_str(&format!(
            "    #place(top + left, dx: {:.2}pt, dy: {:.2}pt, text(size: 7pt)[{}])\n",
            dx,
            dy,
            escape_markup(text)
        ));
    }

    fn finish(mut self, caption: &str) -> String {
        let (bottom, right) = (Self::TOP + self.inner_height(), Self::LEFT + self.inner_width());
        self.body.push_str(&format!(
            "    #place(top + left, line(start: ({l:.2}pt, {b:.2}pt), end: ({r:.2}pt, {b:.2}pt), stroke: {s}))\n    #place(top + left, line(start: ({l:.2}pt, {t:.2}pt), end: ({l:.2}pt, {b:.2}pt), stroke: {s}))\n",
            l = Self::LEFT,
            r = right,
            t = Self::TOP,
            b = bottom,
            s = AXIS_STROKE
        ));

        let (x0, x1, y0, y1) = (self.x.0, self.x.1, self.y.0, self.y.1);
        self.label(Self::LEFT, bottom + 4.0, &tick(x0));
        self.label(right - 36.0, bottom + 4.0, &tick(x1));
        self.label(2.0, bottom - 8.0, &tick(y0));
        self.label(2.0, Self::TOP, &tick(y1));

        format!(
            "#figure(\n  box(width: {:.2}pt, height: {:.2}pt)[\n{}  ],\n  caption: [{}],\n)\n",
            self.size.width,
            self.size.height,
            self.body,
            escape_markup(caption)
        )
    }
}

/// Pad a zero-width range so constant series still map into the box
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn tick(value: f64) -> String {
    crate::summary::fixed(value, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valida_core::{compute_report, EngineOptions};

    fn calibration_dataset() -> Dataset {
        Dataset::new(vec![2.0, 4.0, 6.0, 8.0])
            .with_concentration(vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
    }

    fn report(dataset: &Dataset) -> ValidationReport {
        compute_report(dataset, 5.0, &EngineOptions::default()).unwrap()
    }

    #[test]
    fn test_chart_set_without_concentration() {
        let ds = Dataset::new(vec![1.0, 2.0, 3.0]);
        let charts = ChartSet::build(&ds, &report(&ds), 10).unwrap();
        assert!(charts.calibration.is_none());
        assert_eq!(charts.charts().len(), 2);
        assert_eq!(charts.histogram.histogram.total(), 3);
    }

    #[test]
    fn test_calibration_line_spans_concentration_range() {
        let ds = calibration_dataset();
        let chart = CalibrationChart::new(&ds, &report(&ds)).unwrap();
        let line = chart.line.unwrap();

        assert!((line.start.0 - 1.0).abs() < 1e-12);
        assert!((line.end.0 - 4.0).abs() < 1e-12);
        assert!((line.start.1 - 2.0).abs() < 1e-9);
        assert!((line.end.1 - 8.0).abs() < 1e-9);
        assert_eq!(chart.points.len(), 4);
    }

    #[test]
    fn test_calibration_without_fit_has_no_line() {
        let ds = Dataset::new(vec![1.0, 2.0, 3.0])
            .with_concentration(vec![5.0; 3])
            .unwrap();
        let chart = CalibrationChart::new(&ds, &report(&ds)).unwrap();
        assert!(chart.line.is_none());

        // Constant x still draws inside the box
        let markup = chart.to_typst(ChartSize::default());
        assert!(!markup.contains("NaN"));
        assert!(!markup.contains("inf"));
    }

    #[test]
    fn test_calibration_plots_only_paired_rows() {
        let ds = Dataset::new(vec![2.0, 4.0, 6.0, 9.5])
            .with_concentration_cells(vec![Some(1.0), Some(2.0), Some(3.0), None])
            .unwrap();
        let chart = CalibrationChart::new(&ds, &report(&ds)).unwrap();
        assert_eq!(chart.points, vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        assert!((chart.line.unwrap().slope - 2.0).abs() < 1e-12);

        let empty = Dataset::new(vec![1.0, 2.0])
            .with_concentration_cells(vec![None, None])
            .unwrap();
        assert!(CalibrationChart::new(&empty, &report(&empty)).is_none());
    }

    #[test]
    fn test_histogram_markup() {
        let chart = HistogramChart::new(&[1.0, 2.0, 2.0, 3.0], 3).unwrap();
        let markup = chart.to_typst(ChartSize::default());

        assert!(markup.starts_with("#figure("));
        assert_eq!(markup.matches("rect(").count(), 3);
        assert!(markup.contains("caption: [Histogram of values (3 bins)]"));
    }

    #[test]
    fn test_boxplot_outliers_drawn() {
        let chart = BoxplotChart::new(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(chart.summary.outliers, vec![100.0]);
        let markup = chart.to_typst(ChartSize::default());
        assert_eq!(markup.matches("circle(").count(), 1);
    }

    #[test]
    fn test_constant_values_chart() {
        let ds = Dataset::new(vec![7.0; 5]);
        let charts = ChartSet::build(&ds, &report(&ds), 10).unwrap();
        for chart in charts.charts() {
            let markup = chart.to_typst(ChartSize::default());
            assert!(!markup.contains("NaN"), "{} produced NaN", chart.name());
        }
    }

    #[test]
    fn test_zero_bins_is_chart_error() {
        assert!(matches!(
            HistogramChart::new(&[1.0, 2.0], 0),
            Err(ReportError::Chart { chart: "histogram", .. })
        ));
    }
}
