//! Platform-backed randomness source.
//!
//! Draws come straight from the operating system CSPRNG. A ChaCha20
//! instance with a known seed can be substituted for reproducible runs;
//! it must never be used for real secrets.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, OsRng, RngCore, SeedableRng};

use super::{RandomSource, SourceError};

/// Randomness source backed by a cryptographically secure generator.
pub struct SystemSource<R = OsRng> {
    rng: R,
    /// Total 64-bit words drawn, including rejected ones.
    words_drawn: u64,
}

impl SystemSource<OsRng> {
    /// Creates a source drawing from the OS entropy source.
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for SystemSource<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSource<ChaCha20Rng> {
    /// Creates a reproducible source from a known seed.
    ///
    /// Intended for tests and statistical checks only.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::with_rng(ChaCha20Rng::from_seed(seed))
    }
}

impl<R: RngCore + CryptoRng> SystemSource<R> {
    /// Wraps an existing generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            words_drawn: 0,
        }
    }

    /// Returns the number of 64-bit words drawn so far.
    pub fn words_drawn(&self) -> u64 {
        self.words_drawn
    }
}

impl<R: RngCore + CryptoRng> RandomSource for SystemSource<R> {
    /// Reduces 64-bit words with zone rejection.
    ///
    /// Words at or above the largest multiple of `upper` that fits in
    /// `u64` are discarded, so every residue is equally likely.
    fn randbelow(&mut self, upper: u64) -> Result<u64, SourceError> {
        if upper == 0 {
            return Err(SourceError::EmptyRange);
        }

        let zone = u64::MAX - (u64::MAX % upper + 1) % upper;
        loop {
            let word = self.rng.next_u64();
            self.words_drawn += 1;
            if word <= zone {
                return Ok(word % upper);
            }
        }
    }
}

impl<R> std::fmt::Debug for SystemSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSource")
            .field("words_drawn", &self.words_drawn)
            .finish_non_exhaustive()
    }
}
