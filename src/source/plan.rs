//! Dice sampling plans.
//!
//! A plan fixes how many dice are rolled per batch and which part of the
//! resulting domain is usable. Only values below `upper_multiple` are
//! accepted, and since that bound is an exact multiple of the target range
//! the reduction `value % upper` carries no modulo bias.
//!
//! Domains are computed in `u128` with checked multiplication. Wrapping
//! would silently break uniformity, so overflow is an error.

use thiserror::Error;

/// Success probability used when none is configured.
///
/// With this bound a batch is rejected less than once per million draws.
pub const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.999_999;

/// Errors that can occur while computing a plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("dice must have at least 2 sides, got {0}")]
    InvalidSides(u32),
    #[error("range upper bound must be at least 2, got {0}")]
    InvalidUpper(u64),
    #[error("success probability must lie strictly between 0 and 1, got {0}")]
    InvalidProbability(f64),
    #[error("dice domain overflows at {num_rolls} rolls of a {num_sides}-sided die")]
    Overflow { num_sides: u32, num_rolls: u32 },
}

/// Number of rolls per batch and the accepted sub-range of their domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    required_num_rolls: u32,
    upper_multiple: u128,
    domain: u128,
}

impl SamplingPlan {
    /// Computes the cheapest plan meeting `required_success_probability`.
    ///
    /// Starting from a single roll, dice are added until the largest
    /// multiple of `upper` inside `num_sides^rolls` covers at least the
    /// required fraction of that domain. The first roll count that does so
    /// is returned, so one roll fewer always misses the bound.
    pub fn compute(
        num_sides: u32,
        upper: u64,
        required_success_probability: f64,
    ) -> Result<Self, PlanError> {
        if num_sides < 2 {
            return Err(PlanError::InvalidSides(num_sides));
        }
        if upper < 2 {
            return Err(PlanError::InvalidUpper(upper));
        }
        if !(required_success_probability > 0.0 && required_success_probability < 1.0) {
            return Err(PlanError::InvalidProbability(required_success_probability));
        }

        let base = u128::from(num_sides);
        let upper = u128::from(upper);

        let mut num_rolls = 1u32;
        let mut domain = base;
        loop {
            let upper_multiple = (domain / upper) * upper;
            if ratio(upper_multiple, domain) >= required_success_probability {
                let plan = Self {
                    required_num_rolls: num_rolls,
                    upper_multiple,
                    domain,
                };
                tracing::debug!(
                    num_sides,
                    upper = %upper,
                    rolls = num_rolls,
                    success_probability = plan.success_probability(),
                    "Computed dice sampling plan"
                );
                return Ok(plan);
            }

            num_rolls += 1;
            domain = domain.checked_mul(base).ok_or(PlanError::Overflow {
                num_sides,
                num_rolls,
            })?;
        }
    }

    /// Number of dice rolled per batch.
    #[inline]
    pub fn required_num_rolls(&self) -> u32 {
        self.required_num_rolls
    }

    /// Exclusive bound of accepted batch values; a multiple of the range.
    #[inline]
    pub fn upper_multiple(&self) -> u128 {
        self.upper_multiple
    }

    /// Number of distinct batch values, `num_sides^required_num_rolls`.
    #[inline]
    pub fn domain(&self) -> u128 {
        self.domain
    }

    /// Probability that a single batch is accepted.
    pub fn success_probability(&self) -> f64 {
        ratio(self.upper_multiple, self.domain)
    }

    /// Returns true if a batch value can be used.
    #[inline]
    pub fn accepts(&self, value: u128) -> bool {
        value < self.upper_multiple
    }
}

fn ratio(usable: u128, domain: u128) -> f64 {
    usable as f64 / domain as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn success_at(num_sides: u32, upper: u64, rolls: u32) -> f64 {
        let domain = u128::from(num_sides).pow(rolls);
        let upper = u128::from(upper);
        ratio(domain / upper * upper, domain)
    }

    #[test]
    fn test_exact_power_needs_no_rejection() {
        let plan = SamplingPlan::compute(6, 36, DEFAULT_SUCCESS_PROBABILITY).unwrap();

        assert_eq!(plan.required_num_rolls(), 2);
        assert_eq!(plan.upper_multiple(), 36);
        assert_eq!(plan.success_probability(), 1.0);
    }

    #[test]
    fn test_single_roll_when_sides_match() {
        let plan = SamplingPlan::compute(6, 6, 0.99).unwrap();
        assert_eq!(plan.required_num_rolls(), 1);
        assert_eq!(plan.upper_multiple(), 6);
    }

    #[test]
    fn test_loose_probability_accepts_two_rolls() {
        // 31 of 36 values usable: 0.861
        let plan = SamplingPlan::compute(6, 31, 0.8).unwrap();

        assert_eq!(plan.required_num_rolls(), 2);
        assert_eq!(plan.upper_multiple(), 31);
        assert!(!plan.accepts(35));
        assert!(plan.accepts(30));
    }

    #[test]
    fn test_tight_probability_adds_rolls() {
        let plan = SamplingPlan::compute(6, 31, 0.99).unwrap();

        assert_eq!(plan.required_num_rolls(), 5);
        assert_eq!(plan.domain(), 7776);
        assert_eq!(plan.upper_multiple(), 7750);
    }

    #[test]
    fn test_large_domain_stays_exact() {
        // Needs a domain beyond 10^18, close to the u64 limit.
        let plan = SamplingPlan::compute(20, 999_983, 1.0 - 1e-12).unwrap();
        assert_eq!(plan.upper_multiple() % 999_983, 0);
        assert!(plan.upper_multiple() <= plan.domain());
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            SamplingPlan::compute(1, 10, 0.9),
            Err(PlanError::InvalidSides(1))
        );
        assert_eq!(
            SamplingPlan::compute(6, 1, 0.9),
            Err(PlanError::InvalidUpper(1))
        );
        assert!(matches!(
            SamplingPlan::compute(6, 10, 1.0),
            Err(PlanError::InvalidProbability(_))
        ));
        assert!(matches!(
            SamplingPlan::compute(6, 10, f64::NAN),
            Err(PlanError::InvalidProbability(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_plan_is_minimal(
            num_sides in 2u32..=20,
            upper in 2u64..=1_000_000,
            exponent in 1i32..=6,
        ) {
            let required = 1.0 - 10f64.powi(-exponent);
            let plan = SamplingPlan::compute(num_sides, upper, required).unwrap();
            let rolls = plan.required_num_rolls();

            prop_assert!(rolls >= 1);
            prop_assert!(success_at(num_sides, upper, rolls) >= required);
            prop_assert!(success_at(num_sides, upper, rolls - 1) < required);
        }

        #[test]
        fn prop_upper_multiple_fits_domain(
            num_sides in 2u32..=20,
            upper in 2u64..=1_000_000,
            exponent in 1i32..=6,
        ) {
            let required = 1.0 - 10f64.powi(-exponent);
            let plan = SamplingPlan::compute(num_sides, upper, required).unwrap();

            prop_assert_eq!(plan.upper_multiple() % u128::from(upper), 0);
            prop_assert!(plan.upper_multiple() <= plan.domain());
            prop_assert_eq!(
                plan.domain(),
                u128::from(num_sides).pow(plan.required_num_rolls())
            );
        }
    }
}
