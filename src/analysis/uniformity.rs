//! Chi-squared goodness-of-fit against the uniform distribution.

use thiserror::Error;

use crate::source::{RandomSource, SourceError};

/// Standard normal quantile for a 0.001 upper tail.
pub const CRITICAL_Z: f64 = 3.0902;

/// Largest range [`sample_counts`] will tabulate.
pub const MAX_SAMPLE_UPPER: u64 = 1_000_000;

/// Errors from sampling a source.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("sample range {upper} exceeds the maximum of {max}")]
    RangeTooLarge { upper: u64, max: u64 },
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Chi-squared test result.
#[derive(Debug, Clone)]
pub struct UniformityCheck {
    /// Pearson's chi-squared statistic.
    pub statistic: f64,
    /// Degrees of freedom (cells - 1).
    pub degrees_of_freedom: usize,
    /// Statistic above which uniformity is rejected.
    pub critical_value: f64,
    /// Number of draws counted.
    pub sample_size: u64,
}

impl UniformityCheck {
    /// Runs the test on per-value draw counts.
    pub fn from_counts(counts: &[u64]) -> Self {
        let sample_size: u64 = counts.iter().sum();
        let degrees_of_freedom = counts.len().saturating_sub(1);

        Self {
            statistic: Self::compute_statistic(counts, sample_size),
            degrees_of_freedom,
            critical_value: Self::critical_value(degrees_of_freedom),
            sample_size,
        }
    }

    fn compute_statistic(counts: &[u64], sample_size: u64) -> f64 {
        if counts.is_empty() || sample_size == 0 {
            return 0.0;
        }

        let expected = sample_size as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum()
    }

    /// Approximates the chi-squared quantile at [`CRITICAL_Z`].
    ///
    /// Uses the Wilson-Hilferty cube-root transform, which is accurate to
    /// a few percent from 2 degrees of freedom up.
    fn critical_value(degrees_of_freedom: usize) -> f64 {
        if degrees_of_freedom == 0 {
            return 0.0;
        }
        let k = degrees_of_freedom as f64;
        let h = 2.0 / (9.0 * k);
        k * (1.0 - h + CRITICAL_Z * h.sqrt()).powi(3)
    }

    /// Returns true if the counts are consistent with uniform draws.
    pub fn looks_uniform(&self) -> bool {
        self.statistic <= self.critical_value
    }
}

/// Draws `samples` values below `upper` and counts each outcome.
///
/// One counter is kept per value, so `upper` is capped at
/// [`MAX_SAMPLE_UPPER`].
pub fn sample_counts<R: RandomSource>(
    source: &mut R,
    upper: u64,
    samples: u64,
) -> Result<Vec<u64>, AnalysisError> {
    if upper == 0 {
        return Err(SourceError::EmptyRange.into());
    }
    if upper > MAX_SAMPLE_UPPER {
        return Err(AnalysisError::RangeTooLarge {
            upper,
            max: MAX_SAMPLE_UPPER,
        });
    }

    let mut counts = vec![0u64; upper as usize];
    for _ in 0..samples {
        counts[source.randbelow(upper)? as usize] += 1;
    }

    tracing::debug!(upper, samples, "Collected draw counts");
    Ok(counts)
}
