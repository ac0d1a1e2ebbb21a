//! Password alphabets.
//!
//! An alphabet is a set: duplicates are dropped and characters are kept
//! in canonical (sorted) order, so listing a character twice never makes
//! it more likely to be drawn.

use std::collections::BTreeSet;

use crate::config::ConfigError;

/// Base character sets, by name.
pub const PRESETS: [(&str, &str); 4] = [
    ("lowercase", "abcdefghijklmnopqrstuvwxyz"),
    ("uppercase", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("digits", "0123456789"),
    ("special", "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"),
];

/// Shortcut names expanding to several presets.
pub const SHORTCUTS: [(&str, &[&str]); 3] = [
    ("letters", &["lowercase", "uppercase"]),
    ("alnum", &["lowercase", "uppercase", "digits"]),
    ("all", &["lowercase", "uppercase", "digits", "special"]),
];

/// Deduplicated, sorted set of single characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the characters of `chars`.
    pub fn from_chars(chars: &str) -> Result<Self, ConfigError> {
        Self::from_set(chars.chars().collect())
    }

    /// Creates an alphabet from tokens that must each be one character.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for token in tokens {
            let token = token.as_ref();
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    set.insert(c);
                }
                _ => return Err(ConfigError::MultiCharacterToken(token.to_string())),
            }
        }
        Self::from_set(set)
    }

    /// Merges `include` with the named presets, then removes `exclude`.
    pub fn build<S: AsRef<str>>(
        include: &str,
        presets: &[S],
        exclude: &str,
    ) -> Result<Self, ConfigError> {
        let mut set: BTreeSet<char> = include.chars().collect();
        for name in presets {
            set.extend(preset_chars(name.as_ref().trim())?.chars());
        }
        for c in exclude.chars() {
            set.remove(&c);
        }
        Self::from_set(set)
    }

    fn from_set(set: BTreeSet<char>) -> Result<Self, ConfigError> {
        if set.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self {
            chars: set.into_iter().collect(),
        })
    }

    /// Characters in canonical order.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of distinct characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; empty alphabets cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Expands a preset or shortcut name to its characters.
pub fn preset_chars(name: &str) -> Result<String, ConfigError> {
    if let Some((_, chars)) = PRESETS.iter().find(|(preset, _)| *preset == name) {
        return Ok((*chars).to_string());
    }
    if let Some((_, parts)) = SHORTCUTS.iter().find(|(shortcut, _)| *shortcut == name) {
        return parts.iter().map(|part| preset_chars(part)).collect();
    }
    Err(ConfigError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_removed_and_sorted() {
        let alphabet = Alphabet::from_chars("aabbcd").unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.chars(), ['a', 'b', 'c', 'd']);

        let shuffled = Alphabet::from_chars("dcba").unwrap();
        assert_eq!(alphabet, shuffled);
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert_eq!(Alphabet::from_chars(""), Err(ConfigError::EmptyAlphabet));
        let none: [&str; 0] = [];
        assert_eq!(
            Alphabet::from_tokens(none),
            Err(ConfigError::EmptyAlphabet)
        );
    }

    #[test]
    fn test_multi_character_token_rejected() {
        assert_eq!(
            Alphabet::from_tokens(["a", "bc"]),
            Err(ConfigError::MultiCharacterToken("bc".to_string()))
        );
        assert_eq!(
            Alphabet::from_tokens(["a", ""]),
            Err(ConfigError::MultiCharacterToken(String::new()))
        );
        assert_eq!(Alphabet::from_tokens(["ä", "b"]).unwrap().len(), 2);
    }

    #[test]
    fn test_presets_and_shortcuts() {
        assert_eq!(preset_chars("digits").unwrap(), "0123456789");
        assert_eq!(preset_chars("letters").unwrap().len(), 52);
        assert_eq!(preset_chars("alnum").unwrap().len(), 62);
        assert_eq!(preset_chars("all").unwrap().len(), 94);
        assert_eq!(
            preset_chars("emoji"),
            Err(ConfigError::UnknownPreset("emoji".to_string()))
        );
    }

    #[test]
    fn test_build_merges_and_excludes() {
        let alphabet = Alphabet::build("xyz", &["digits"], "0lz").unwrap();
        assert_eq!(alphabet.len(), 11);
        assert!(!alphabet.chars().contains(&'0'));
        assert!(!alphabet.chars().contains(&'z'));
        assert!(alphabet.chars().contains(&'x'));
    }

    #[test]
    fn test_build_excluding_everything() {
        let result = Alphabet::build::<&str>("ab", &[], "ab");
        assert_eq!(result, Err(ConfigError::EmptyAlphabet));
    }
}
