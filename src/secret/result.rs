//! Generated secret with its entropy estimate.

/// Outcome of one generation call.
///
/// The `Debug` output never includes the secret text.
#[derive(Clone, PartialEq)]
pub struct SecretResult {
    text: String,
    entropy_bits: f64,
    entropy_is_guaranteed: bool,
}

impl SecretResult {
    pub(crate) fn new(text: String, entropy_bits: f64, entropy_is_guaranteed: bool) -> Self {
        Self {
            text,
            entropy_bits,
            entropy_is_guaranteed,
        }
    }

    /// The generated passphrase or password.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the result, returning the secret text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Entropy estimate in bits.
    #[inline]
    pub fn entropy_bits(&self) -> f64 {
        self.entropy_bits
    }

    /// True if the estimate is exact rather than an upper bound.
    #[inline]
    pub fn entropy_is_guaranteed(&self) -> bool {
        self.entropy_is_guaranteed
    }
}

impl std::fmt::Debug for SecretResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretResult")
            .field("entropy_bits", &self.entropy_bits)
            .field("entropy_is_guaranteed", &self.entropy_is_guaranteed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let result = SecretResult::new("hunter2".to_string(), 12.5, true);
        let shown = format!("{result:?}");

        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("12.5"));
        assert_eq!(result.into_text(), "hunter2");
    }
}
