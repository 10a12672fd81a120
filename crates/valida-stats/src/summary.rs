//! Summary statistics for datasets
//!
//! Provides the descriptive statistics the validation engine is built on:
//! - Arithmetic mean
//! - Sample variance and standard deviation (divisor n - 1)
//!
//! Sums are accumulated relative to the first observation,
//! `mean = v0 + Σ(v - v0) / n`. This is algebraically `Σv / n` but keeps a
//! series of identical values at exactly that value as mean and exactly
//! zero as variance.

use crate::error::{require_finite, require_len, StatsResult};

/// Arithmetic mean of the data
///
/// Requires at least one finite value.
pub fn mean(data: &[f64]) -> StatsResult<f64> {
    require_len(data, 1)?;
    require_finite(data)?;
    Ok(shifted_mean(data))
}

/// Sample variance with Bessel's correction (divisor n - 1)
///
/// Requires at least two finite values.
pub fn sample_variance(data: &[f64]) -> StatsResult<f64> {
    require_len(data, 2)?;
    require_finite(data)?;
    let m = shifted_mean(data);
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Ok(ss / (data.len() - 1) as f64)
}

/// Sample standard deviation (square root of [`sample_variance`])
pub fn sample_std_dev(data: &[f64]) -> StatsResult<f64> {
    sample_variance(data).map(f64::sqrt)
}

// Caller guarantees a non-empty, finite slice.
fn shifted_mean(data: &[f64]) -> f64 {
    let origin = data[0];
    let offset: f64 = data.iter().map(|x| x - origin).sum();
    origin + offset / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;

    #[test]
    fn test_mean_and_variance_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert!((mean(&data).unwrap() - 5.5).abs() < 1e-12);
        // Sample variance of 1..=10 is 55/6
        assert!((sample_variance(&data).unwrap() - 55.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_values_are_exact() {
        for v in [0.1, 10.0, -3.7, 1e9 + 0.3] {
            let data = vec![v; 7];
            assert_eq!(mean(&data).unwrap(), v);
            assert_eq!(sample_std_dev(&data).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_mean_agrees_with_plain_sum() {
        let data = [9.81, 10.02, 10.13, 9.97, 10.4, 9.66, 10.05];
        let plain = data.iter().sum::<f64>() / data.len() as f64;
        let m = mean(&data).unwrap();
        assert!((m - plain).abs() <= 4.0 * f64::EPSILON * plain.abs());

        // The plain sum drifts on repeated 0.1, the shifted form does not
        let tenths = [0.1; 3];
        assert_ne!(tenths.iter().sum::<f64>() / 3.0, 0.1);
        assert_eq!(mean(&tenths).unwrap(), 0.1);
    }

    #[test]
    fn test_bessel_correction() {
        // Population SD of [2,4,4,4,5,5,7,9] is 2; sample SD is sqrt(32/7)
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_std_dev(&data).unwrap();
        assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            sample_std_dev(&[1.0]),
            Err(StatsError::InsufficientData { needed: 2, got: 1 })
        );
        assert_eq!(
            mean(&[]),
            Err(StatsError::InsufficientData { needed: 1, got: 0 })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            sample_variance(&[1.0, f64::NAN, 3.0]),
            Err(StatsError::NonFinite { index: 1 })
        ));
    }
}
