//! Secret generation and entropy accounting.
//!
//! Generators draw every element through a [`RandomSource`] and report
//! how much entropy the result carries. Passphrases also report whether
//! that figure is exact or only an upper bound.
//!
//! [`RandomSource`]: crate::source::RandomSource

mod passphrase;
mod password;
mod result;

pub use passphrase::PassphraseGenerator;
pub use password::PasswordGenerator;
pub use result::SecretResult;
