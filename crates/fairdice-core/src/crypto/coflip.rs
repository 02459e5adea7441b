//! Two-party coin flip over `[0, bound)`.
//!
//! One side commits to a uniform value and publishes the digest. The other
//! side then picks any number in range. The result is the sum of both modulo
//! `bound`, which stays uniform as long as the committed value was, whatever
//! the counterpart chose.

use super::commitment::{CommitDigest, CommitKey, CommitPhase, FairCommitment};
use super::random::SecureRandom;
use crate::error::{DiceError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a finished coin flip, including the material needed to audit it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoflipResult {
    pub committed_value: u64,
    pub counterpart_value: u64,
    pub bound: u64,
    pub combined_index: u64,
    pub key: CommitKey,
    pub digest: CommitDigest,
}

impl CoflipResult {
    /// Re-check the digest and the mod-sum
    pub fn verify(&self) -> bool {
        self.digest.verify(&self.key, self.committed_value)
            && self.bound > 0
            && self.counterpart_value < self.bound
            && self.combined_index == combine_mod(self.committed_value, self.counterpart_value, self.bound)
    }
}

/// `(a + b) mod bound` without overflow
pub fn combine_mod(a: u64, b: u64, bound: u64) -> u64 {
    ((u128::from(a) + u128::from(b)) % u128::from(bound)) as u64
}

/// A coin flip in progress
#[derive(Debug)]
pub struct FairCoflip {
    commitment: FairCommitment,
}

impl FairCoflip {
    /// Commit to a fresh random value below `bound`
    pub fn start<R: SecureRandom + ?Sized>(rng: &mut R, bound: u64) -> Result<Self> {
        let (_, commitment) = FairCommitment::open(rng, bound)?;
        Ok(Self { commitment })
    }

    /// Digest to publish before asking the counterpart
    pub fn digest(&self) -> CommitDigest {
        self.commitment.digest()
    }

    pub fn bound(&self) -> u64 {
        self.commitment.bound()
    }

    pub fn phase(&self) -> CommitPhase {
        self.commitment.phase()
    }

    /// Fold in the counterpart value and reveal the commitment.
    ///
    /// Values outside `[0, bound)` are rejected and leave the round open, so
    /// the key stays secret and a valid value can still be supplied.
    pub fn combine(&mut self, counterpart_value: i64) -> Result<CoflipResult> {
        let bound = self.bound();
        let counterpart_value = u64::try_from(counterpart_value)
            .ok()
            .filter(|v| *v < bound)
            .ok_or(DiceError::OutOfRange {
                value: counterpart_value,
                bound,
            })?;

        let committed_value = self.commitment.lock()?;
        let opening = self.commitment.reveal()?;
        let combined_index = combine_mod(committed_value, counterpart_value, bound);
        debug!(
            committed_value,
            counterpart_value, bound, combined_index, "coin flip combined"
        );

        Ok(CoflipResult {
            committed_value: opening.value,
            counterpart_value,
            bound,
            combined_index,
            key: opening.key,
            digest: self.commitment.digest(),
        })
    }
}
