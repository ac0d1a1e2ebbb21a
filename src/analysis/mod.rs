//! Uniformity testing for randomness sources.
//!
//! A chi-squared goodness-of-fit test over draw counts. This is a
//! sanity check for obvious bias, not a proof of uniformity.

mod uniformity;

pub use uniformity::{
    sample_counts, AnalysisError, UniformityCheck, CRITICAL_Z, MAX_SAMPLE_UPPER,
};
