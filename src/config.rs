//! Generation settings and configuration errors.
//!
//! Every setting has a default so that a settings file only needs to
//! name what it changes. Validation happens before any randomness is
//! consumed: a bad setting must never cost the operator a dice roll.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::source::plan::DEFAULT_SUCCESS_PROBABILITY;

/// Configuration errors.
///
/// All of these are fatal to a generation call and are raised before
/// the first draw.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown randomness source `{name}`, use one of {available}")]
    UnknownSource { name: String, available: String },
    #[error("delimiter must be a single character or empty, got {0:?}")]
    InvalidDelimiter(String),
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet must consist of single characters, got {0:?}")]
    MultiCharacterToken(String),
    #[error("unknown alphabet preset `{0}`")]
    UnknownPreset(String),
    #[error("wordlist contains no usable words")]
    EmptyWordlist,
    #[error("invalid word size filter: min {min} is larger than max {max}")]
    InvalidWordSize { min: usize, max: usize },
    #[error("dice must have at least 2 sides, got {0}")]
    InvalidDiceSides(u32),
    #[error("success probability must lie strictly between 0 and 1, got {0}")]
    InvalidSuccessProbability(f64),
    #[error("failed to read file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Randomness source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Registry name of the source (`system` or `dice`).
    pub name: String,
    /// Number of sides of the physical dice.
    pub dice_sides: u32,
    /// Required probability that a batch of rolls is accepted.
    pub success_probability: f64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            name: crate::source::registry::default_source().to_string(),
            dice_sides: 6,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
        }
    }
}

/// Passphrase settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PassphraseSettings {
    /// Separator between words (empty or one character).
    pub delimiter: String,
    /// Drop words shorter than this.
    pub min_word_size: usize,
    /// Drop words longer than this.
    pub max_word_size: Option<usize>,
    /// Normalize entries like `11111 foo` to `foo`.
    pub remove_leading_digits: bool,
}

impl Default for PassphraseSettings {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            min_word_size: 1,
            max_word_size: None,
            remove_leading_digits: false,
        }
    }
}

/// Password alphabet settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    /// Preset and shortcut names merged into the alphabet.
    pub presets: Vec<String>,
    /// Extra characters merged into the alphabet.
    pub include: String,
    /// Characters removed from the merged alphabet.
    pub exclude: String,
}

/// Full settings file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub passphrase: PassphraseSettings,
    #[serde(default)]
    pub password: PasswordSettings,
}

impl SourceSettings {
    /// Validates the source settings without building a source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::source::registry::SourceKind::from_name(&self.name)?;
        if self.dice_sides < 2 {
            return Err(ConfigError::InvalidDiceSides(self.dice_sides));
        }
        if !(self.success_probability > 0.0 && self.success_probability < 1.0) {
            return Err(ConfigError::InvalidSuccessProbability(
                self.success_probability,
            ));
        }
        Ok(())
    }
}

impl PassphraseSettings {
    /// Validates the passphrase settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.chars().count() > 1 {
            return Err(ConfigError::InvalidDelimiter(self.delimiter.clone()));
        }
        if let Some(max) = self.max_word_size {
            if self.min_word_size > max {
                return Err(ConfigError::InvalidWordSize {
                    min: self.min_word_size,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()?;
        self.passphrase.validate()
    }
}
