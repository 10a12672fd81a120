//! Equal-width histogram binning
//!
//! Bins span `[min, max]` of the data; every bin is half-open except the
//! last, which also includes `max`. A constant series is binned over
//! `[v - 0.5, v + 0.5]` so the chart still has a visible extent.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_len, StatsError, StatsResult};

/// Bin count used for the values histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Binned counts of a numeric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (length = number of bins + 1)
    pub edges: Vec<f64>,
    /// Count of observations per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `data` into `n_bins` equal-width bins
    pub fn from_data(data: &[f64], n_bins: usize) -> StatsResult<Self> {
        require_len(data, 1)?;
        require_finite(data)?;
        if n_bins == 0 {
            return Err(StatsError::Degenerate("bin count must be positive".to_string()));
        }

        let mut lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins)
            .map(|i| if i == n_bins { hi } else { lo + i as f64 * width })
            .collect();

        let mut counts = vec![0usize; n_bins];
        for &x in data {
            let bin = ((x - lo) / width).floor() as usize;
            counts[bin.min(n_bins - 1)] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Width of every bin
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Largest bin count
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Total number of binned observations
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_bins_over_range() {
        let data: Vec<f64> = (0..=10).map(|x| x as f64).collect();
        let h = Histogram::from_data(&data, DEFAULT_HISTOGRAM_BINS).unwrap();

        assert_eq!(h.num_bins(), 10);
        assert_eq!(h.edges.len(), 11);
        assert_eq!(h.edges[0], 0.0);
        assert_eq!(h.edges[10], 10.0);
        // The maximum lands in the last (closed) bin
        assert_eq!(h.counts[9], 2);
        assert_eq!(h.total(), 11);
    }

    #[test]
    fn test_constant_series() {
        let h = Histogram::from_data(&[3.0, 3.0, 3.0], 10).unwrap();
        assert_eq!(h.edges[0], 2.5);
        assert_eq!(h.edges[10], 3.5);
        assert_eq!(h.total(), 3);
        assert_eq!(h.max_count(), 3);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(Histogram::from_data(&[1.0, 2.0], 0).is_err());
    }
}
