//! Error types for valida-stats

use thiserror::Error;

/// Errors raised by the statistical primitives
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Not enough observations for the requested statistic
    #[error("Insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Paired inputs differ in length
    #[error("Length mismatch: {left} values paired with {right} values")]
    LengthMismatch { left: usize, right: usize },

    /// NaN or infinite value in the input
    #[error("Non-finite value at index {index}")]
    NonFinite { index: usize },

    /// Input is well-formed but the statistic is undefined for it
    #[error("Degenerate input: {0}")]
    Degenerate(String),

    /// Failure constructing a reference distribution
    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Result type alias for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Reject inputs with fewer than `needed` points
pub(crate) fn require_len(data: &[f64], needed: usize) -> StatsResult<()> {
    if data.len() < needed {
        return Err(StatsError::InsufficientData {
            needed,
            got: data.len(),
        });
    }
    Ok(())
}

/// Reject inputs containing NaN or infinity
pub(crate) fn require_finite(data: &[f64]) -> StatsResult<()> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(StatsError::NonFinite { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = StatsError::InsufficientData { needed: 2, got: 1 };
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite(&[1.0, 2.0]).is_ok());
        assert_eq!(
            require_finite(&[1.0, f64::NAN]),
            Err(StatsError::NonFinite { index: 1 })
        );
    }
}
