//! Secure random sources.
//!
//! Every component that needs randomness takes a `SecureRandom` so tests can
//! swap the operating system source for a seeded one.

use crate::error::{DiceError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Source of cryptographically secure random bytes
pub trait SecureRandom {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Draw an integer uniformly from `[0, bound)`
    ///
    /// Uses rejection sampling over 64-bit draws, so bounds that are not a
    /// power of two carry no modulo bias.
    fn uniform_below(&mut self, bound: u64) -> Result<u64> {
        if bound == 0 {
            return Err(DiceError::InvalidBound(bound));
        }
        // Largest multiple of `bound` that fits in the u64 range.
        let zone = u64::MAX - (u64::MAX % bound + 1) % bound;
        loop {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf)?;
            let draw = u64::from_le_bytes(buf);
            if draw <= zone {
                return Ok(draw % bound);
            }
        }
    }
}

impl<R: SecureRandom + ?Sized> SecureRandom for &mut R {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// Operating system entropy
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl SecureRandom for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| DiceError::EntropyUnavailable(e.to_string()))
    }
}

/// Deterministic source for tests and replays
#[derive(Clone, Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    /// Create from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl SecureRandom for SeededRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}
