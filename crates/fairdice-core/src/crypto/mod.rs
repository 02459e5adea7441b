//! Cryptographic primitives for the fair dice protocol.
//!
//! This module provides:
//! - SecureRandom sources (OS entropy and a seeded one for tests)
//! - FairCommitment, an HMAC-SHA3-256 commit-reveal of a random value
//! - FairCoflip, the mod-sum coin flip built on top of a commitment

mod coflip;
mod commitment;
mod random;

pub use coflip::{combine_mod, CoflipResult, FairCoflip};
pub use commitment::{
    verify_opening, CommitDigest, CommitKey, CommitPhase, FairCommitment, Opening,
};
pub use random::{OsEntropy, SecureRandom, SeededRandom};
