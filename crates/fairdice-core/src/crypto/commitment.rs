//! HMAC commitment to a random value.
//!
//! digest = HMAC-SHA3-256(key, decimal(value))
//!
//! The digest is published before the counterpart picks its number. The key
//! is handed out only once the counterpart value has been combined, after
//! which anyone can recompute the digest and check the value was fixed up
//! front.

use super::random::SecureRandom;
use crate::error::{DiceError, Result};
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;
use tracing::debug;

type HmacSha3 = Hmac<Sha3_256>;

/// 256-bit secret key, drawn fresh for every commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitKey(#[serde(with = "hex_bytes")] [u8; 32]);

impl CommitKey {
    /// Draw a new random key
    pub fn random<R: SecureRandom + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CommitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitKey({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for CommitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Published half of a commitment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitDigest(#[serde(with = "hex_bytes")] [u8; 32]);

impl CommitDigest {
    /// Compute the digest for a key and value
    pub fn compute(key: &CommitKey, value: u64) -> Self {
        let mac = keyed_mac(key, value);
        Self(mac.finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check that `key` and `value` reproduce this digest.
    ///
    /// The comparison is constant time.
    pub fn verify(&self, key: &CommitKey, value: u64) -> bool {
        keyed_mac(key, value).verify_slice(&self.0).is_ok()
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CommitDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for CommitDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn keyed_mac(key: &CommitKey, value: u64) -> HmacSha3 {
    // HMAC zero-pads short keys to one block, so a padded block gives the same MAC.
    let mut block = Key::<HmacSha3>::default();
    block[..key.as_bytes().len()].copy_from_slice(key.as_bytes());
    let mut mac = <HmacSha3 as KeyInit>::new(&block);
    mac.update(&encode_value(value));
    mac
}

/// Values are committed as their decimal ASCII form
fn encode_value(value: u64) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Counterpart-side check of a revealed commitment
pub fn verify_opening(digest: &CommitDigest, key: &CommitKey, value: u64) -> bool {
    digest.verify(key, value)
}

/// Lifecycle of a commitment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitPhase {
    /// Digest published, key secret
    Open,
    /// Counterpart value fixed, key may be revealed
    Combined,
    /// Key handed out
    Revealed,
}

/// Revealed value and key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub value: u64,
    pub key: CommitKey,
}

/// A committed random value in `[0, bound)`
pub struct FairCommitment {
    key: CommitKey,
    value: u64,
    bound: u64,
    phase: CommitPhase,
}

impl FairCommitment {
    /// Draw a fresh key and a uniform value below `bound`, returning the
    /// digest to publish alongside the commitment.
    pub fn open<R: SecureRandom + ?Sized>(
        rng: &mut R,
        bound: u64,
    ) -> Result<(CommitDigest, Self)> {
        if bound == 0 {
            return Err(DiceError::InvalidBound(bound));
        }
        let key = CommitKey::random(rng)?;
        let value = rng.uniform_below(bound)?;
        let commitment = Self {
            key,
            value,
            bound,
            phase: CommitPhase::Open,
        };
        let digest = commitment.digest();
        debug!(bound, digest = %digest, "commitment opened");
        Ok((digest, commitment))
    }

    /// Recompute the published digest
    pub fn digest(&self) -> CommitDigest {
        CommitDigest::compute(&self.key, self.value)
    }

    /// Exclusive upper bound of the committed value
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CommitPhase {
        self.phase
    }

    /// Record that the counterpart value is now fixed.
    ///
    /// Returns the committed value for the mod-sum.
    pub(crate) fn lock(&mut self) -> Result<u64> {
        match self.phase {
            CommitPhase::Open => {
                self.phase = CommitPhase::Combined;
                Ok(self.value)
            }
            CommitPhase::Combined | CommitPhase::Revealed => Err(DiceError::AlreadyCombined),
        }
    }

    /// Hand out the committed value and its key.
    ///
    /// Fails while the commitment is still open. Calling it again after a
    /// successful reveal returns the same opening.
    pub fn reveal(&mut self) -> Result<Opening> {
        match self.phase {
            CommitPhase::Open => Err(DiceError::RevealBeforeCombine),
            CommitPhase::Combined | CommitPhase::Revealed => {
                self.phase = CommitPhase::Revealed;
                debug!(value = self.value, key = %self.key, "commitment revealed");
                Ok(Opening {
                    value: self.value,
                    key: self.key.clone(),
                })
            }
        }
    }
}

impl fmt::Debug for FairCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FairCommitment")
            .field("bound", &self.bound)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}
