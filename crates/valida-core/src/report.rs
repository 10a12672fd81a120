//! Validation report record
//!
//! The report is produced once per dataset/reference pair and never
//! mutated afterwards. Ratio metrics that can hit a zero denominator are
//! [`Metric`]s; blocks that depend on an optional column are
//! `Option<Metric<_>>`, where `None` means the column was absent.

use serde::{Deserialize, Serialize};

/// Coverage factor for the expanded uncertainty
pub const COVERAGE_FACTOR: f64 = 2.0;

/// Multiplier of the blank standard deviation giving the limit of detection
pub const LOD_FACTOR: f64 = 3.0;

/// Multiplier of the blank standard deviation giving the limit of quantitation
pub const LOQ_FACTOR: f64 = 10.0;

/// Minimum R² for the linear range to be accepted
pub const LINEARITY_R2_THRESHOLD: f64 = 0.995;

/// Minimum ANOVA p-value for the method to be considered robust
pub const ROBUSTNESS_P_THRESHOLD: f64 = 0.05;

/// Linear range verdict: accepted iff `r_squared >= 0.995`
pub fn linear_range_accepted(r_squared: f64) -> bool {
    r_squared >= LINEARITY_R2_THRESHOLD
}

/// Robustness verdict: robust iff `p_value >= 0.05`
pub fn is_robust(p_value: f64) -> bool {
    p_value >= ROBUSTNESS_P_THRESHOLD
}

/// Why a metric could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    /// Reference value is zero
    ZeroReference,
    /// Mean of the values is zero
    ZeroMean,
    /// Too few observations
    InsufficientData { needed: usize, got: usize },
    /// Statistic undefined for this input
    Degenerate { detail: String },
    /// Block switched off in the engine options
    Disabled,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::ZeroReference => write!(f, "reference value is zero"),
            Unavailable::ZeroMean => write!(f, "mean is zero"),
            Unavailable::InsufficientData { needed, got } => {
                write!(f, "need at least {} points, got {}", needed, got)
            }
            Unavailable::Degenerate { detail } => write!(f, "{}", detail),
            Unavailable::Disabled => write!(f, "disabled"),
        }
    }
}

/// A computed value, or the reason it is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Metric<T> {
    /// The value, if computed
    pub fn available(&self) -> Option<&T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable(_) => None,
        }
    }

    /// The reason, if not computed
    pub fn unavailable(&self) -> Option<&Unavailable> {
        match self {
            Metric::Available(_) => None,
            Metric::Unavailable(reason) => Some(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    /// Transform the computed value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Available(v) => Metric::Available(f(v)),
            Metric::Unavailable(reason) => Metric::Unavailable(reason),
        }
    }
}

impl Metric<f64> {
    /// `100 * numerator / denominator`-style ratio with an explicit zero guard
    pub(crate) fn ratio(numerator: f64, denominator: f64, scale: f64, on_zero: Unavailable) -> Self {
        if denominator == 0.0 {
            return Metric::Unavailable(on_zero);
        }
        let value = scale * numerator / denominator;
        if value.is_finite() {
            Metric::Available(value)
        } else {
            Metric::Unavailable(Unavailable::Degenerate {
                detail: "ratio overflows".to_string(),
            })
        }
    }

    /// The value, if computed
    pub fn value(&self) -> Option<f64> {
        self.available().copied()
    }
}

/// Limits of detection and quantitation from blank measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionLimits {
    /// Number of blank measurements
    pub n: usize,
    /// Sample standard deviation of the blanks
    pub sd_blank: f64,
    /// Limit of detection (3 · sd_blank)
    pub lod: f64,
    /// Limit of quantitation (10 · sd_blank)
    pub loq: f64,
}

/// Calibration fit of values against concentration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linearity {
    /// Number of (concentration, value) pairs
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r: f64,
    /// r²
    pub r_squared: f64,
    /// `r_squared >= LINEARITY_R2_THRESHOLD`
    pub linear_range_accepted: bool,
}

impl Linearity {
    /// Evaluate the calibration line at a concentration
    pub fn predict(&self, concentration: f64) -> f64 {
        self.slope * concentration + self.intercept
    }
}

/// One-way ANOVA across experimental groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robustness {
    /// Group labels in the order they were tested
    pub groups: Vec<String>,
    /// F-statistic; `None` when groups are internally constant but differ
    pub f_statistic: Option<f64>,
    pub df_between: usize,
    pub df_within: usize,
    pub p_value: f64,
    /// `p_value >= ROBUSTNESS_P_THRESHOLD`
    pub robust: bool,
}

/// Every metric and verdict computed for one dataset/reference pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of values
    pub n: usize,
    /// Certified reference value the report was computed against
    pub reference_value: f64,

    pub mean: f64,
    /// mean - reference
    pub bias: f64,
    /// 100 · bias / reference
    pub bias_pct: Metric<f64>,

    /// Sample standard deviation (n - 1)
    pub sd: f64,
    /// 100 · sd / mean
    pub rsd_pct: Metric<f64>,

    /// sd / sqrt(n)
    pub standard_uncertainty: f64,
    /// COVERAGE_FACTOR · standard_uncertainty
    pub expanded_uncertainty: f64,

    /// mean / reference
    pub sensitivity: Metric<f64>,

    /// Present iff the blank column was supplied
    pub detection_limits: Option<Metric<DetectionLimits>>,
    /// Present iff the concentration column was supplied
    pub linearity: Option<Metric<Linearity>>,
    /// Present iff the group column was supplied
    pub robustness: Option<Metric<Robustness>>,
}

impl ValidationReport {
    /// Computed detection limits, if any
    pub fn detection_limits(&self) -> Option<&DetectionLimits> {
        self.detection_limits.as_ref().and_then(Metric::available)
    }

    /// Computed linearity block, if any
    pub fn linearity(&self) -> Option<&Linearity> {
        self.linearity.as_ref().and_then(Metric::available)
    }

    /// Computed robustness block, if any
    pub fn robustness(&self) -> Option<&Robustness> {
        self.robustness.as_ref().and_then(Metric::available)
    }

    pub fn lod(&self) -> Option<f64> {
        self.detection_limits().map(|d| d.lod)
    }

    pub fn loq(&self) -> Option<f64> {
        self.detection_limits().map(|d| d.loq)
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.linearity().map(|l| l.r_squared)
    }

    pub fn linear_range_accepted(&self) -> Option<bool> {
        self.linearity().map(|l| l.linear_range_accepted)
    }

    pub fn anova_p_value(&self) -> Option<f64> {
        self.robustness().map(|r| r.p_value)
    }

    pub fn robust(&self) -> Option<bool> {
        self.robustness().map(|r| r.robust)
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
