//! Dicepass Library
//!
//! Turns raw entropy, from the operating system or from a human rolling
//! physical dice, into uniformly chosen passphrases and passwords, and
//! reports honestly how much entropy the result carries.
//!
//! # Architecture
//!
//! Control flows in one direction only:
//!
//! ```text
//! secret generator → RandomSource ─┬→ SystemSource (OS CSPRNG)
//!                                  └→ DiceSource → SamplingPlan
//!                                         ↕
//!                                     RollPrompt (operator)
//! ```
//!
//! # Design Principles
//!
//! - **No modulo bias**: dice batches outside an exact multiple of the
//!   target range are rejected and rolled again
//! - **Minimal rolls**: each batch uses the fewest dice meeting the
//!   configured success probability
//! - **Honest entropy**: passphrase estimates are flagged when word
//!   boundaries could be ambiguous
//! - **Fail before drawing**: configuration errors surface before any
//!   randomness is consumed
//!
//! # Example
//!
//! ```no_run
//! use dicepass::{
//!     secret::PassphraseGenerator,
//!     source::SystemSource,
//!     symbols::{WordFilter, Wordlist},
//! };
//!
//! let wordlist = Wordlist::from_file("eff_large_wordlist.txt", &WordFilter {
//!     remove_leading_digits: true,
//!     ..Default::default()
//! }).unwrap();
//!
//! let mut generator = PassphraseGenerator::new(wordlist, SystemSource::new(), " ").unwrap();
//! let result = generator.generate(6).unwrap();
//!
//! println!("{} ({:.1} bits)", result.text(), result.entropy_bits());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod secret;
pub mod source;
pub mod symbols;

// Re-export commonly used types at crate root
pub use config::{ConfigError, Settings};
pub use secret::{PassphraseGenerator, PasswordGenerator, SecretResult};
pub use source::{DiceSource, RandomSource, SamplingPlan, SourceError, SystemSource};
pub use symbols::{Alphabet, WordFilter, Wordlist};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
