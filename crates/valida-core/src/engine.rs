//! Validation engine
//!
//! [`compute_report`] is a pure function: it reads only its arguments and
//! never mutates the dataset. Failures in the `value` series abort the
//! report; failures in an optional column only mark that block
//! unavailable. Linearity uses the rows with a concentration and
//! robustness the rows with a group label; other rows still count for
//! every value-series metric.

use serde::{Deserialize, Serialize};
use valida_stats::{linear_regression, one_way_anova, sample_std_dev, StatsError};

use crate::dataset::Dataset;
use crate::error::{EngineError, EngineResult};
use crate::report::{
    is_robust, linear_range_accepted, DetectionLimits, Linearity, Metric, Robustness,
    Unavailable, ValidationReport, COVERAGE_FACTOR, LOD_FACTOR, LOQ_FACTOR,
};

/// Per-block switches for the optional metrics
///
/// A disabled block whose column is present is reported as
/// [`Unavailable::Disabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Compute LOD/LOQ when a blank column is present
    pub detection_limits: bool,
    /// Fit the calibration line when a concentration column is present
    pub linearity: bool,
    /// Run the ANOVA when a group column is present
    pub robustness: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            detection_limits: true,
            linearity: true,
            robustness: true,
        }
    }
}

/// Compute every validation metric for `dataset` against `reference_value`
///
/// # Errors
///
/// - [`EngineError::InsufficientData`] if there are fewer than two values
/// - [`EngineError::InvalidSeries`] if a value is NaN or infinite
/// - [`EngineError::InvalidReference`] if the reference is NaN or infinite
pub fn compute_report(
    dataset: &Dataset,
    reference_value: f64,
    options: &EngineOptions,
) -> EngineResult<ValidationReport> {
    if !reference_value.is_finite() {
        return Err(EngineError::InvalidReference(reference_value));
    }

    let values = dataset.values();
    let n = values.len();
    tracing::debug!(n, reference_value, "computing validation report");

    // sample_std_dev validates length and finiteness for the whole series
    let sd = sample_std_dev(values).map_err(|e| EngineError::for_series("value", e))?;
    let mean = valida_stats::mean(values).map_err(|e| EngineError::for_series("value", e))?;

    // Trueness
    let bias = mean - reference_value;
    let bias_pct = Metric::ratio(bias, reference_value, 100.0, Unavailable::ZeroReference);

    // Precision
    let rsd_pct = Metric::ratio(sd, mean, 100.0, Unavailable::ZeroMean);

    // Uncertainty
    let standard_uncertainty = sd / (n as f64).sqrt();
    let expanded_uncertainty = COVERAGE_FACTOR * standard_uncertainty;

    // Sensitivity
    let sensitivity = Metric::ratio(mean, reference_value, 1.0, Unavailable::ZeroReference);

    let detection_limits = dataset
        .blank()
        .map(|blank| gated(options.detection_limits, || detection_limits(blank)));

    let linearity = dataset
        .calibration_pairs()
        .map(|pairs| gated(options.linearity, || linearity(&pairs, n)));

    let robustness = dataset
        .groups()
        .map(|groups| gated(options.robustness, || robustness(&groups)));

    Ok(ValidationReport {
        n,
        reference_value,
        mean,
        bias,
        bias_pct,
        sd,
        rsd_pct,
        standard_uncertainty,
        expanded_uncertainty,
        sensitivity,
        detection_limits,
        linearity,
        robustness,
    })
}

fn gated<T>(enabled: bool, compute: impl FnOnce() -> Metric<T>) -> Metric<T> {
    if enabled {
        compute()
    } else {
        Metric::Unavailable(Unavailable::Disabled)
    }
}

fn detection_limits(blank: &[f64]) -> Metric<DetectionLimits> {
    match sample_std_dev(blank) {
        Ok(sd_blank) => Metric::Available(DetectionLimits {
            n: blank.len(),
            sd_blank,
            lod: LOD_FACTOR * sd_blank,
            loq: LOQ_FACTOR * sd_blank,
        }),
        Err(e) => skipped("detection limits", e),
    }
}

fn linearity(pairs: &[(f64, f64)], n: usize) -> Metric<Linearity> {
    if pairs.len() < n {
        tracing::warn!(
            used = pairs.len(),
            skipped = n - pairs.len(),
            "fitting calibration on rows with a concentration only"
        );
    }
    let (concentration, values): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    match linear_regression(&concentration, &values) {
        Ok(fit) => Metric::Available(Linearity {
            n: fit.n,
            slope: fit.slope,
            intercept: fit.intercept,
            r: fit.r,
            r_squared: fit.r_squared,
            linear_range_accepted: linear_range_accepted(fit.r_squared),
        }),
        Err(e) => skipped("linearity", e),
    }
}

fn robustness(groups: &std::collections::BTreeMap<&str, Vec<f64>>) -> Metric<Robustness> {
    let labels: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
    let series: Vec<&[f64]> = groups.values().map(Vec::as_slice).collect();

    match one_way_anova(&series) {
        Ok(anova) => Metric::Available(Robustness {
            groups: labels,
            f_statistic: Some(anova.f_statistic).filter(|f| f.is_finite()),
            df_between: anova.df_between,
            df_within: anova.df_within,
            p_value: anova.p_value,
            robust: is_robust(anova.p_value),
        }),
        Err(e) => skipped("robustness", e),
    }
}

fn skipped<T>(block: &str, err: StatsError) -> Metric<T> {
    tracing::warn!(block, error = %err, "metric block unavailable");
    let reason = match err {
        StatsError::InsufficientData { needed, got } => {
            Unavailable::InsufficientData { needed, got }
        }
        other => Unavailable::Degenerate {
            detail: other.to_string(),
        },
    };
    Metric::Unavailable(reason)
}
