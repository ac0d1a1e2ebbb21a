//! Named randomness sources.
//!
//! Maps the names accepted on the command line and in settings files to
//! concrete sources. The first entry is the default.

use super::dice::DiceSource;
use super::plan::DEFAULT_SUCCESS_PROBABILITY;
use super::prompt::{ConsolePrompt, RollPrompt};
use super::system::SystemSource;
use super::RandomSource;
use crate::config::{ConfigError, SourceSettings};

/// Registered source kinds, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Operating system CSPRNG.
    System,
    /// Physical dice entered by an operator.
    Dice,
}

const REGISTRY: [(&str, SourceKind); 2] =
    [("system", SourceKind::System), ("dice", SourceKind::Dice)];

/// Options a source may need; irrelevant ones are ignored.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Number of sides of the dice.
    pub dice_sides: u32,
    /// Required probability that a dice batch is accepted.
    pub success_probability: f64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            dice_sides: 6,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
        }
    }
}

impl From<&SourceSettings> for SourceOptions {
    fn from(settings: &SourceSettings) -> Self {
        Self {
            dice_sides: settings.dice_sides,
            success_probability: settings.success_probability,
        }
    }
}

impl SourceKind {
    /// Looks up a source by its registry name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownSource {
                name: name.to_string(),
                available: available_sources_str(),
            })
    }

    /// Registry name of this source.
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::System => "system",
            SourceKind::Dice => "dice",
        }
    }

    /// Builds the source, using `prompt` if it talks to an operator.
    pub fn build<'p, P: RollPrompt + 'p>(
        self,
        options: &SourceOptions,
        prompt: P,
    ) -> Result<Box<dyn RandomSource + 'p>, ConfigError> {
        let source: Box<dyn RandomSource + 'p> = match self {
            SourceKind::System => Box::new(SystemSource::new()),
            SourceKind::Dice => Box::new(DiceSource::with_success_probability(
                options.dice_sides,
                options.success_probability,
                prompt,
            )?),
        };
        tracing::info!(source = self.name(), "Randomness source ready");
        Ok(source)
    }
}

/// Name of the default source.
pub fn default_source() -> &'static str {
    REGISTRY[0].0
}

/// Names of all registered sources.
pub fn available_sources() -> Vec<&'static str> {
    REGISTRY.iter().map(|(name, _)| *name).collect()
}

/// Registered names formatted for messages, e.g. `'system', 'dice'`.
pub fn available_sources_str() -> String {
    REGISTRY
        .iter()
        .map(|(name, _)| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds a named source talking to the terminal.
///
/// Fails before any draw if `name` is unknown or the options are invalid.
pub fn build_source(
    name: &str,
    options: &SourceOptions,
) -> Result<Box<dyn RandomSource>, ConfigError> {
    SourceKind::from_name(name)?.build(options, ConsolePrompt::stdio())
}
