//! Physical dice as a randomness source.
//!
//! The operator rolls a batch of dice and types the faces in. Each batch
//! is read as a number in base `num_sides` (first roll most significant)
//! and accepted only if it falls below the plan's `upper_multiple`.
//! Rejected batches are rolled again; they are expected control flow,
//! not failures.
//!
//! # Draw states
//!
//! ```text
//! AwaitingInput → Validating ─┬→ Accepted (done)
//!       ↑           │ bad     └→ Rejected ─┐
//!       └───────────┴─────────────────────┘
//! ```

use thiserror::Error;

use super::plan::{PlanError, SamplingPlan, DEFAULT_SUCCESS_PROBABILITY};
use super::prompt::RollPrompt;
use super::{RandomSource, SourceError};
use crate::config::ConfigError;

/// Malformed operator input.
///
/// Recoverable: the same batch is requested again and nothing is derived
/// from the bad line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollInputError {
    #[error("expected {expected} rolls, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("roll {roll} is outside 1..={num_sides}")]
    OutOfRange { roll: u32, num_sides: u32 },
}

/// Reduces a batch of rolls to its positional value.
///
/// Each roll is shifted to `roll - 1` and used as a base-`num_sides`
/// digit, most significant first. Returns `None` if a roll lies outside
/// `1..=num_sides` or the value does not fit in a `u128`.
pub fn rolls_to_value(num_sides: u32, rolls: &[u32]) -> Option<u128> {
    let base = u128::from(num_sides);
    rolls.iter().try_fold(0u128, |value, &roll| {
        if roll == 0 || roll > num_sides {
            return None;
        }
        value.checked_mul(base)?.checked_add(u128::from(roll - 1))
    })
}

enum DrawState {
    AwaitingInput,
    Validating(String),
    Rejected,
    Accepted(u128),
}

/// Randomness source driven by an operator rolling physical dice.
pub struct DiceSource<P> {
    num_sides: u32,
    required_success_probability: f64,
    prompt: P,
    /// Batches accepted so far.
    batches_accepted: u64,
    /// Batches rejected so far.
    batches_rejected: u64,
}

impl<P: RollPrompt> DiceSource<P> {
    /// Creates a dice source with the default success probability.
    pub fn new(num_sides: u32, prompt: P) -> Result<Self, ConfigError> {
        Self::with_success_probability(num_sides, DEFAULT_SUCCESS_PROBABILITY, prompt)
    }

    /// Creates a dice source with a custom success probability.
    pub fn with_success_probability(
        num_sides: u32,
        required_success_probability: f64,
        prompt: P,
    ) -> Result<Self, ConfigError> {
        if num_sides < 2 {
            return Err(ConfigError::InvalidDiceSides(num_sides));
        }
        if !(required_success_probability > 0.0 && required_success_probability < 1.0) {
            return Err(ConfigError::InvalidSuccessProbability(
                required_success_probability,
            ));
        }

        Ok(Self {
            num_sides,
            required_success_probability,
            prompt,
            batches_accepted: 0,
            batches_rejected: 0,
        })
    }

    /// Number of sides of the dice.
    pub fn num_sides(&self) -> u32 {
        self.num_sides
    }

    /// Returns the operator channel.
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Batches accepted so far.
    pub fn batches_accepted(&self) -> u64 {
        self.batches_accepted
    }

    /// Batches rejected so far.
    pub fn batches_rejected(&self) -> u64 {
        self.batches_rejected
    }

    /// Parses one line of operator input into a batch of rolls.
    ///
    /// The line must hold exactly `expected` whitespace-separated faces.
    pub fn parse_rolls(&self, line: &str, expected: usize) -> Result<Vec<u32>, RollInputError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != expected {
            return Err(RollInputError::WrongCount {
                expected,
                got: tokens.len(),
            });
        }

        tokens
            .into_iter()
            .map(|token| {
                let roll: u32 = token
                    .parse()
                    .map_err(|_| RollInputError::NotANumber(token.to_string()))?;
                if roll == 0 || roll > self.num_sides {
                    return Err(RollInputError::OutOfRange {
                        roll,
                        num_sides: self.num_sides,
                    });
                }
                Ok(roll)
            })
            .collect()
    }

    fn request_message(&self, plan: &SamplingPlan) -> String {
        match plan.required_num_rolls() {
            1 => format!(
                "Roll 1 die with {} sides and enter the result:",
                self.num_sides
            ),
            n => format!(
                "Roll {} dice with {} sides and enter the results separated by spaces:",
                n, self.num_sides
            ),
        }
    }
}

impl<P: RollPrompt> RandomSource for DiceSource<P> {
    fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError> {
        match upper {
            0 => return Err(SourceError::EmptyRange),
            1 => return Ok(0),
            _ => {}
        }

        let plan = SamplingPlan::compute(self.num_sides, upper, self.required_success_probability)?;
        let num_rolls = plan.required_num_rolls() as usize;
        let message = self.request_message(&plan);

        let mut state = DrawState::AwaitingInput;
        loop {
            state = match state {
                DrawState::AwaitingInput => match self.prompt.request(&message)? {
                    Some(line) => DrawState::Validating(line),
                    None => return Err(SourceError::InputClosed),
                },
                DrawState::Validating(line) => match self.parse_rolls(&line, num_rolls) {
                    Ok(rolls) => {
                        let value = rolls_to_value(self.num_sides, &rolls).ok_or(
                            PlanError::Overflow {
                                num_sides: self.num_sides,
                                num_rolls: plan.required_num_rolls(),
                            },
                        )?;
                        if plan.accepts(value) {
                            DrawState::Accepted(value)
                        } else {
                            DrawState::Rejected
                        }
                    }
                    Err(error) => {
                        tracing::debug!(%error, "Malformed dice input");
                        self.prompt
                            .notify(&format!("Invalid input: {error}. Please try again."))?;
                        DrawState::AwaitingInput
                    }
                },
                DrawState::Rejected => {
                    self.batches_rejected += 1;
                    tracing::debug!(
                        rejected = self.batches_rejected,
                        "Dice batch outside usable range"
                    );
                    self.prompt.notify(
                        "These rolls cannot be used without biasing the result. \
                         Please roll all dice again.",
                    )?;
                    DrawState::AwaitingInput
                }
                DrawState::Accepted(value) => {
                    self.batches_accepted += 1;
                    return Ok((value % u128::from(upper)) as u64);
                }
            };
        }
    }
}

impl<P> std::fmt::Debug for DiceSource<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceSource")
            .field("num_sides", &self.num_sides)
            .field(
                "required_success_probability",
                &self.required_success_probability,
            )
            .field("batches_accepted", &self.batches_accepted)
            .field("batches_rejected", &self.batches_rejected)
            .finish_non_exhaustive()
    }
}
