//! Boxplot summary statistics
//!
//! Quartiles use linear interpolation between order statistics
//! (position `(n - 1) * p` in the sorted data). Whiskers reach the most
//! extreme observations inside the Tukey fences `Q1 - 1.5·IQR` and
//! `Q3 + 1.5·IQR`; anything beyond them is an outlier.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_len, StatsResult};

/// Tukey fence multiplier
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Quantile of sorted data by linear interpolation
///
/// `sorted` must be non-empty and ascending; `p` is clamped to [0, 1].
pub fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Everything needed to draw a single box-and-whisker glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest observation not below the lower fence
    pub lower_whisker: f64,
    /// Highest observation not above the upper fence
    pub upper_whisker: f64,
    /// Observations outside the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl BoxplotSummary {
    /// Summarize `data` for a boxplot
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        require_len(data, 1)?;
        require_finite(data)?;

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = interpolated_quantile(&sorted, 0.25);
        let median = interpolated_quantile(&sorted, 0.5);
        let q3 = interpolated_quantile(&sorted, 0.75);

        let iqr = q3 - q1;
        let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|&x| x >= lower_fence && x <= upper_fence)
            .collect();
        // The median always lies inside the fences, so `inside` is non-empty.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        let outliers = sorted
            .into_iter()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Smallest value drawn (whisker end or outlier)
    pub fn plot_min(&self) -> f64 {
        self.outliers
            .first()
            .copied()
            .map_or(self.lower_whisker, |o| o.min(self.lower_whisker))
    }

    /// Largest value drawn (whisker end or outlier)
    pub fn plot_max(&self) -> f64 {
        self.outliers
            .last()
            .copied()
            .map_or(self.upper_whisker, |o| o.max(self.upper_whisker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolated_quartiles() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(interpolated_quantile(&sorted, 0.25), 1.75);
        assert_eq!(interpolated_quantile(&sorted, 0.5), 2.5);
        assert_eq!(interpolated_quantile(&sorted, 0.75), 3.25);
        assert_eq!(interpolated_quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_boxplot_with_outlier() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let b = BoxplotSummary::from_data(&data).unwrap();

        assert_eq!(b.median, 3.5);
        assert_eq!(b.outliers, vec![100.0]);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 5.0);
        assert_eq!(b.plot_max(), 100.0);
        assert_eq!(b.plot_min(), 1.0);
    }

    #[test]
    fn test_boxplot_unsorted_input() {
        let b = BoxplotSummary::from_data(&[5.0, 1.0, 3.0]).unwrap();
        assert_eq!(b.q1, 2.0);
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q3, 4.0);
        assert!(b.outliers.is_empty());
        assert_eq!(b.iqr(), 2.0);
    }

    #[test]
    fn test_single_value() {
        let b = BoxplotSummary::from_data(&[7.0]).unwrap();
        assert_eq!(b.q1, 7.0);
        assert_eq!(b.q3, 7.0);
        assert_eq!(b.lower_whisker, 7.0);
    }
}
