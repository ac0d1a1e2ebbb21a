//! Passphrases drawn from a wordlist.

use crate::config::ConfigError;
use crate::source::{RandomSource, SourceError};
use crate::symbols::Wordlist;

use super::SecretResult;

/// Generates passphrases by repeated `choice` over a wordlist.
pub struct PassphraseGenerator<R> {
    wordlist: Wordlist,
    source: R,
    delimiter: String,
    /// Whether the delimiter also occurs inside some word.
    delimiter_in_words: bool,
}

impl<R: RandomSource> PassphraseGenerator<R> {
    /// Creates a generator joining words with `delimiter`.
    ///
    /// The delimiter must be empty or a single character.
    pub fn new(wordlist: Wordlist, source: R, delimiter: &str) -> Result<Self, ConfigError> {
        let mut chars = delimiter.chars();
        let delimiter_in_words = match (chars.next(), chars.next()) {
            (None, _) => false,
            (Some(c), None) => wordlist.contains_char(c),
            (Some(_), Some(_)) => return Err(ConfigError::InvalidDelimiter(delimiter.to_string())),
        };

        Ok(Self {
            wordlist,
            source,
            delimiter: delimiter.to_string(),
            delimiter_in_words,
        })
    }

    /// Draws `count` words and joins them.
    pub fn generate(&mut self, count: usize) -> Result<SecretResult, SourceError> {
        let mut words = Vec::with_capacity(count);
        for _ in 0..count {
            words.push(self.source.choice(self.wordlist.words())?.as_str());
        }

        let result = SecretResult::new(
            words.join(&self.delimiter),
            count as f64 * self.entropy_per_word(),
            self.entropy_is_guaranteed(count),
        );

        tracing::info!(
            words = count,
            entropy_bits = result.entropy_bits(),
            guaranteed = result.entropy_is_guaranteed(),
            "Generated passphrase"
        );
        Ok(result)
    }

    /// Entropy contributed by each word.
    pub fn entropy_per_word(&self) -> f64 {
        (self.wordlist.len() as f64).log2()
    }

    /// Returns true if `count` words are known to carry the full estimate.
    ///
    /// Conservative: when the delimiter cannot reliably mark word
    /// boundaries, distinct draws may render to the same text and the
    /// estimate is only an upper bound. This answers false in that case
    /// even if no such collision actually exists.
    pub fn entropy_is_guaranteed(&self, count: usize) -> bool {
        if count <= 1 {
            // No delimiter is emitted.
            return true;
        }
        !self.delimiter.is_empty() && !self.delimiter_in_words
    }

    /// The wordlist drawn from.
    pub fn wordlist(&self) -> &Wordlist {
        &self.wordlist
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

    fn cat_dog() -> Wordlist {
        Wordlist::from_words(["cat", "dog"]).unwrap()
    }

    #[test]
    fn test_space_delimiter_guaranteed() {
        let mut generator =
            PassphraseGenerator::new(cat_dog(), SystemSource::new(), " ").unwrap();
        let result = generator.generate(3).unwrap();

        assert!(result.entropy_is_guaranteed());
        assert_eq!(result.entropy_bits(), 3.0);
        assert_eq!(result.text().split(' ').count(), 3);
        assert!(result
            .text()
            .split(' ')
            .all(|word| word == "cat" || word == "dog"));
    }

    #[test]
    fn test_empty_delimiter_not_guaranteed() {
        let generator = PassphraseGenerator::new(cat_dog(), SystemSource::new(), "").unwrap();
        assert!(!generator.entropy_is_guaranteed(3));
    }

    #[test]
    fn test_delimiter_inside_word_not_guaranteed() {
        let generator = PassphraseGenerator::new(cat_dog(), SystemSource::new(), "o").unwrap();
        assert!(!generator.entropy_is_guaranteed(3));
        assert!(generator.entropy_is_guaranteed(1));
        assert!(generator.entropy_is_guaranteed(0));
    }

    #[test]
    fn test_long_delimiter_rejected() {
        let result = PassphraseGenerator::new(cat_dog(), SystemSource::new(), "--");
        assert!(matches!(result, Err(ConfigError::InvalidDelimiter(_))));
    }

    #[test]
    fn test_long_delimiter_consumes_no_rolls() {
        let prompt = ScriptedPrompt::from_rolls(&[[1u32]]);
        let mut source = DiceSource::new(6, prompt).unwrap();
        assert!(PassphraseGenerator::new(cat_dog(), &mut source, "::").is_err());
        assert!(source.prompt().requests().is_empty());
        assert_eq!(source.prompt().remaining(), 1);
    }

    #[test]
    fn test_zero_words() {
        let mut generator =
            PassphraseGenerator::new(cat_dog(), SystemSource::new(), " ").unwrap();
        let result = generator.generate(0).unwrap();

        assert_eq!(result.text(), "");
        assert_eq!(result.entropy_bits(), 0.0);
        assert!(result.entropy_is_guaranteed());
    }

    #[test]
    fn test_dice_driven_passphrase() {
        // Four words, one die each: index = roll - 1.
        let words = Wordlist::from_words(["alpha", "bravo", "charlie", "delta"]).unwrap();
        let source = DiceSource::with_success_probability(
            4,
            0.9,
            ScriptedPrompt::from_rolls(&[[3u32], [1], [4]]),
        )
        .unwrap();
        let mut generator = PassphraseGenerator::new(words, source, "-").unwrap();
        let result = generator.generate(3).unwrap();

        assert_eq!(result.text(), "charlie-alpha-delta");
        assert_eq!(result.entropy_bits(), 6.0);
        assert!(result.entropy_is_guaranteed());
        assert_eq!(generator.source().prompt().remaining(), 0);
    }

    #[test]
    fn test_seeded_sources_pick_words_uniformly() {
        let words: Vec<String> = (0..16).map(|i| format!("w{i:02}")).collect();

        for seed in [[11u8; 32], [12u8; 32]] {
            let list = Wordlist::from_words(words.clone()).unwrap();
            let mut generator =
                PassphraseGenerator::new(list, SystemSource::from_seed(seed), " ").unwrap();

            let mut counts = vec![0u64; words.len()];
            for _ in 0..400 {
                let result = generator.generate(10).unwrap();
                for word in result.text().split(' ') {
                    let index: usize = word[1..].parse().unwrap();
                    counts[index] += 1;
                }
            }

            let check = UniformityCheck::from_counts(&counts);
            assert!(check.looks_uniform(), "{check:?}");
        }
    }
}
