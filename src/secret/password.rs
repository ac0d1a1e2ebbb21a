//! Passwords drawn from an alphabet.

use crate::config::ConfigError;
use crate::source::{RandomSource, SourceError};
use crate::symbols::Alphabet;

use super::SecretResult;

/// Generates passwords by repeated `choice` over an alphabet.
///
/// Single characters have no boundary ambiguity, so the entropy estimate
/// is always exact.
pub struct PasswordGenerator<R> {
    alphabet: Alphabet,
    source: R,
}

impl<R: RandomSource> PasswordGenerator<R> {
    /// Creates a generator over a prepared alphabet.
    pub fn new(alphabet: Alphabet, source: R) -> Self {
        Self { alphabet, source }
    }

    /// Creates a generator over the distinct characters of `chars`.
    pub fn from_chars(chars: &str, source: R) -> Result<Self, ConfigError> {
        Ok(Self::new(Alphabet::from_chars(chars)?, source))
    }

    /// Draws `length` characters.
    pub fn generate(&mut self, length: usize) -> Result<SecretResult, SourceError> {
        let mut password = String::with_capacity(length);
        for _ in 0..length {
            password.push(*self.source.choice(self.alphabet.chars())?);
        }

        let result = SecretResult::new(password, length as f64 * self.entropy_per_char(), true);

        tracing::info!(
            length,
            entropy_bits = result.entropy_bits(),
            "Generated password"
        );
        Ok(result)
    }

    /// Entropy contributed by each character.
    pub fn entropy_per_char(&self) -> f64 {
        (self.alphabet.len() as f64).log2()
    }

    /// The deduplicated alphabet drawn from.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The randomness source.
    pub fn source(&self) -> &R {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UniformityCheck;
    use crate::source::{DiceSource, ScriptedPrompt, SystemSource};

    #[test]
    fn test_duplicates_do_not_inflate_entropy() {
        let mut generator = PasswordGenerator::from_chars("aabbcd", SystemSource::new()).unwrap();
        assert_eq!(generator.alphabet().len(), 4);

        let result = generator.generate(5).unwrap();
        assert_eq!(result.entropy_bits(), 10.0);
        assert!(result.entropy_is_guaranteed());
        assert_eq!(result.text().chars().count(), 5);
        assert!(result.text().chars().all(|c| "abcd".contains(c)));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let result = PasswordGenerator::from_chars("", SystemSource::new());
        assert!(matches!(result, Err(ConfigError::EmptyAlphabet)));
    }

    #[test]
    fn test_single_character_alphabet() {
        let prompt = ScriptedPrompt::default();
        let source = DiceSource::new(6, prompt).unwrap();
        let mut generator = PasswordGenerator::from_chars("zzz", source).unwrap();

        // One choice needs no entropy, so the operator is never asked.
        let result = generator.generate(4).unwrap();
        assert_eq!(result.text(), "zzzz");
        assert_eq!(result.entropy_bits(), 0.0);
        assert!(generator.source().prompt().requests().is_empty());
    }

    #[test]
    fn test_dice_driven_password() {
        // Canonical order is a, b, c, d, e, f; one d6 per character.
        let source = DiceSource::new(6, ScriptedPrompt::from_rolls(&[[6u32], [1], [3]])).unwrap();
        let mut generator = PasswordGenerator::from_chars("fedcba", source).unwrap();

        assert_eq!(generator.generate(3).unwrap().text(), "fac");
    }

    #[test]
    fn test_seeded_sources_pick_characters_uniformly() {
        for seed in [[21u8; 32], [22u8; 32]] {
            let mut generator =
                PasswordGenerator::from_chars("aabbcd", SystemSource::from_seed(seed)).unwrap();
            let text = generator.generate(20_000).unwrap().into_text();

            let mut counts = [0u64; 4];
            for c in text.chars() {
                counts[(c as u8 - b'a') as usize] += 1;
            }

            let check = UniformityCheck::from_counts(&counts);
            assert!(check.looks_uniform(), "{check:?}");
        }
    }
}
