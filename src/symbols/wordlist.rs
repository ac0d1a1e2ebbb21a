//! Wordlists for passphrases.
//!
//! One entry per line. Diceware-style lists prefix every word with its
//! dice index (`11111 abacus`); `remove_leading_digits` strips that.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{ConfigError, PassphraseSettings};

/// Filters applied while loading a wordlist.
#[derive(Debug, Clone)]
pub struct WordFilter {
    /// Drop words with fewer characters.
    pub min_word_size: usize,
    /// Drop words with more characters.
    pub max_word_size: Option<usize>,
    /// Strip a leading run of digits and the whitespace after it.
    pub remove_leading_digits: bool,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_word_size: 1,
            max_word_size: None,
            remove_leading_digits: false,
        }
    }
}

impl From<&PassphraseSettings> for WordFilter {
    fn from(settings: &PassphraseSettings) -> Self {
        Self {
            min_word_size: settings.min_word_size,
            max_word_size: settings.max_word_size,
            remove_leading_digits: settings.remove_leading_digits,
        }
    }
}

impl WordFilter {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.max_word_size {
            Some(max) if self.min_word_size > max => Err(ConfigError::InvalidWordSize {
                min: self.min_word_size,
                max,
            }),
            _ => Ok(()),
        }
    }

    fn apply<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut word = line.trim();
        if self.remove_leading_digits {
            word = word.trim_start_matches(|c: char| c.is_ascii_digit()).trim_start();
        }
        if word.is_empty() {
            return None;
        }

        let size = word.chars().count();
        if size < self.min_word_size || self.max_word_size.is_some_and(|max| size > max) {
            return None;
        }
        Some(word)
    }
}

/// Ordered list of distinct words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// Creates a wordlist from words, dropping duplicates.
    pub fn from_words<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|word| seen.insert(word.clone()))
            .collect();

        if words.is_empty() {
            return Err(ConfigError::EmptyWordlist);
        }
        Ok(Self { words })
    }

    /// Parses newline-separated text, applying `filter`.
    pub fn parse(text: &str, filter: &WordFilter) -> Result<Self, ConfigError> {
        filter.validate()?;
        let list = Self::from_words(text.lines().filter_map(|line| filter.apply(line)))?;

        tracing::debug!(words = list.len(), "Parsed wordlist");
        Ok(list)
    }

    /// Loads a wordlist file, applying `filter`.
    pub fn from_file(path: impl AsRef<Path>, filter: &WordFilter) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {e}", path.display())))?;
        Self::parse(&text, filter)
    }

    /// Words in file order.
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; empty wordlists cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true if `c` occurs inside any word.
    pub fn contains_char(&self, c: char) -> bool {
        self.words.iter().any(|word| word.contains(c))
    }
}
