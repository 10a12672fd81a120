//! Ordinary least-squares linear regression
//!
//! Fits `y = slope * x + intercept` in closed form:
//!
//! ```text
//! slope     = Sxy / Sxx
//! intercept = ȳ - slope * x̄
//! r         = Sxy / (sqrt(Sxx) * sqrt(Syy))
//! ```
//!
//! When every `y` is identical the correlation coefficient is reported as
//! zero; when every `x` is identical the fit is undefined.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_len, StatsError, StatsResult};
use crate::summary::mean;

/// Result of a simple linear regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope coefficient
    pub slope: f64,
    /// Intercept
    pub intercept: f64,
    /// Pearson correlation coefficient, clamped to [-1, 1]
    pub r: f64,
    /// Coefficient of determination (r²)
    pub r_squared: f64,
    /// Number of (x, y) pairs
    pub n: usize,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Regress `y` on `x` by ordinary least squares
///
/// # Errors
///
/// - [`StatsError::InsufficientData`] with fewer than two pairs
/// - [`StatsError::LengthMismatch`] if the slices differ in length
/// - [`StatsError::NonFinite`] on NaN or infinite input
/// - [`StatsError::Degenerate`] if all `x` values are identical
pub fn linear_regression(x: &[f64], y: &[f64]) -> StatsResult<LinearFit> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    require_len(x, 2)?;
    require_finite(x)?;
    require_finite(y)?;

    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 {
        return Err(StatsError::Degenerate(
            "all x values are identical".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r,
        r_squared: r * r,
        n: x.len(),
    })
}
