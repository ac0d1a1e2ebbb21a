//! Randomness sources.
//!
//! Every generator draws through the [`RandomSource`] capability and never
//! sees which concrete source it is using. A source only has to supply
//! `randbelow`; `choice` is derived from it.

mod dice;
pub mod plan;
mod prompt;
pub mod registry;
mod system;

pub use dice::{rolls_to_value, DiceSource, RollInputError};
pub use plan::{PlanError, SamplingPlan, DEFAULT_SUCCESS_PROBABILITY};
pub use prompt::{ConsolePrompt, RollPrompt, ScriptedPrompt, MAX_LINE_BYTES};
pub use registry::{build_source, SourceKind, SourceOptions};
pub use system::SystemSource;

use thiserror::Error;

/// Errors that can occur while drawing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot draw from an empty range")]
    EmptyRange,
    #[error("operator input closed before the draw completed")]
    InputClosed,
    #[error("operator I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot plan dice draw: {0}")]
    Plan(#[from] PlanError),
}

/// Capability to draw uniformly distributed integers.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `[0, upper)`.
    fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError>;

    /// Returns an element drawn uniformly from `items`.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, SourceError>
    where
        Self: Sized,
    {
        let index = self.randbelow(items.len() as u64)?;
        Ok(&items[index as usize])
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError> {
        (**self).randbelow(upper)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError> {
        (**self).randbelow(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source returning a fixed sequence of indices.
    struct Fixed(Vec<u64>);

    impl RandomSource for Fixed {
        fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError> {
            if upper == 0 {
                return Err(SourceError::EmptyRange);
            }
            Ok(self.0.remove(0) % upper)
        }
    }

    #[test]
    fn test_choice_indexes_by_randbelow() {
        let mut source = Fixed(vec![2, 0]);
        let items = ["a", "b", "c"];

        assert_eq!(*source.choice(&items).unwrap(), "c");
        assert_eq!(*source.choice(&items).unwrap(), "a");
    }

    #[test]
    fn test_choice_through_box() {
        let mut source: Box<dyn RandomSource> = Box::new(Fixed(vec![1]));
        assert_eq!(*source.choice(&['x', 'y']).unwrap(), 'y');
    }

    #[test]
    fn test_choice_empty_slice() {
        let mut source = Fixed(vec![]);
        let empty: [u8; 0] = [];
        assert!(matches!(
            source.choice(&empty),
            Err(SourceError::EmptyRange)
        ));
    }
}
