//! One-way analysis of variance
//!
//! Tests H₀: all group means are equal.
//!
//! ```text
//! F = MS_between / MS_within
//! MS_between = SS_between / (k - 1)
//! MS_within  = SS_within  / (N - k)
//! ```
//!
//! The p-value is the upper tail of the F(k - 1, N - k) distribution.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::error::{require_finite, StatsError, StatsResult};
use crate::summary::mean;

/// Minimum number of groups for a one-way ANOVA
pub const ANOVA_MIN_GROUPS: usize = 2;

/// Minimum number of observations in every group
pub const ANOVA_MIN_GROUP_SIZE: usize = 2;

/// Result of a one-way ANOVA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    /// F-statistic (infinite when groups are internally constant but differ)
    pub f_statistic: f64,
    /// Degrees of freedom between groups (k - 1)
    pub df_between: usize,
    /// Degrees of freedom within groups (N - k)
    pub df_within: usize,
    /// Upper-tail probability of the F-statistic
    pub p_value: f64,
    /// Sum of squares between groups
    pub ss_between: f64,
    /// Sum of squares within groups
    pub ss_within: f64,
    /// Mean of each group, in input order
    pub group_means: Vec<f64>,
    /// Mean of all observations
    pub grand_mean: f64,
}

/// Run a one-way ANOVA across `groups`
///
/// # Errors
///
/// - [`StatsError::InsufficientData`] if there are fewer than two groups or
///   any group has fewer than two observations
/// - [`StatsError::NonFinite`] on NaN or infinite input
/// - [`StatsError::Degenerate`] if every observation is identical, which
///   leaves F undefined (0/0)
pub fn one_way_anova(groups: &[&[f64]]) -> StatsResult<AnovaResult> {
    let k = groups.len();
    if k < ANOVA_MIN_GROUPS {
        return Err(StatsError::InsufficientData {
            needed: ANOVA_MIN_GROUPS,
            got: k,
        });
    }
    for g in groups {
        if g.len() < ANOVA_MIN_GROUP_SIZE {
            return Err(StatsError::InsufficientData {
                needed: ANOVA_MIN_GROUP_SIZE,
                got: g.len(),
            });
        }
        require_finite(g)?;
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let total_n = all.len();
    let grand_mean = mean(&all)?;

    let group_means = groups
        .iter()
        .map(|g| mean(g))
        .collect::<StatsResult<Vec<f64>>>()?;

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();

    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.iter().map(|&x| (x - gm).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1;
    let df_within = total_n - k;

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let (f_statistic, p_value) = if ms_within > 0.0 {
        let f = ms_between / ms_within;
        (f, f_upper_tail(f, df_between, df_within)?)
    } else if ms_between > 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        return Err(StatsError::Degenerate(
            "all observations are identical".to_string(),
        ));
    };

    Ok(AnovaResult {
        f_statistic,
        df_between,
        df_within,
        p_value,
        ss_between,
        ss_within,
        group_means,
        grand_mean,
    })
}

fn f_upper_tail(f: f64, df1: usize, df2: usize) -> StatsResult<f64> {
    let dist = FisherSnedecor::new(df1 as f64, df2 as f64)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok((1.0 - dist.cdf(f)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearly_different_means() {
        let group1 = [5.0, 6.0, 7.0, 5.5, 6.5];
        let group2 = [8.0, 9.0, 8.5, 9.5, 8.0];
        let group3 = [4.0, 3.0, 3.5, 4.5, 4.0];
        let r = one_way_anova(&[&group1, &group2, &group3]).unwrap();
        assert!(r.p_value < 0.01);
        assert_eq!(r.df_between, 2);
        assert_eq!(r.df_within, 12);
        assert_eq!(r.group_means.len(), 3);
    }

    #[test]
    fn test_overlapping_groups() {
        // Equivalent to a two-sample t-test with t² = F = 1.5, df = 4
        let r = one_way_anova(&[&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]]).unwrap();
        assert!((r.f_statistic - 1.5).abs() < 1e-12);
        assert!((r.ss_between - 1.5).abs() < 1e-12);
        assert!((r.ss_within - 4.0).abs() < 1e-12);
        assert!(r.p_value > 0.25 && r.p_value < 0.33);
        assert!((r.grand_mean - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_constant_groups_far_apart() {
        let r = one_way_anova(&[&[1.0, 1.0, 1.0], &[100.0, 100.0, 100.0]]).unwrap();
        assert!(r.f_statistic.is_infinite());
        assert_eq!(r.p_value, 0.0);
    }

    #[test]
    fn test_identical_groups_have_p_one() {
        let r = one_way_anova(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(r.f_statistic, 0.0);
        assert!((r.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_identical_is_degenerate() {
        assert!(matches!(
            one_way_anova(&[&[2.0, 2.0], &[2.0, 2.0]]),
            Err(StatsError::Degenerate(_))
        ));
    }

    #[test]
    fn test_requires_two_groups() {
        assert_eq!(
            one_way_anova(&[&[1.0, 2.0, 3.0]]),
            Err(StatsError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_requires_two_points_per_group() {
        assert_eq!(
            one_way_anova(&[&[1.0, 2.0], &[3.0]]),
            Err(StatsError::InsufficientData { needed: 2, got: 1 })
        );
    }
}
