//! Symbol sets that secrets are drawn from.
//!
//! Wordlists feed passphrases, alphabets feed passwords. Both are
//! validated when built, so a generator never starts drawing from an
//! empty or malformed set.

mod alphabet;
mod wordlist;

pub use alphabet::{preset_chars, Alphabet, PRESETS, SHORTCUTS};
pub use wordlist::{WordFilter, Wordlist};
