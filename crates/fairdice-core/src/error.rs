//! Error types for the fair dice protocol.

use thiserror::Error;

/// Errors raised by the core protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice configuration: {spec}. {reason}")]
    InvalidDieSpec { spec: String, reason: String },

    #[error("Not enough dice: got {found}, need at least {required}")]
    NotEnoughDice { found: usize, required: usize },

    #[error("Invalid bound {0}: must be greater than zero")]
    InvalidBound(u64),

    #[error("Value {value} is outside the range 0..{bound}")]
    OutOfRange { value: i64, bound: u64 },

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Face index {index} out of range for a die with {len} faces")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Commitment key cannot be revealed before the counterpart value is combined")]
    RevealBeforeCombine,

    #[error("Round already combined")]
    AlreadyCombined,

    #[error("Game session has already terminated")]
    GameTerminated,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiceError>;
