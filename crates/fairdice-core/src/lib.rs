//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal coin flip, dice definitions,
//! win-probability tables and the game state machine for a two-party dice
//! game in which neither side can bias a roll.

pub mod config;
pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use config::{DieStrategy, GameConfig};
pub use crypto::{
    CoflipResult, CommitDigest, CommitKey, FairCoflip, FairCommitment, OsEntropy, SecureRandom,
    SeededRandom,
};
pub use error::{DiceError, Result};
pub use games::{parse_dice, Die, ProbabilityMatrix, WinProbability};
pub use protocol::{
    Counterpart, GameEvent, GameId, GameProtocol, GameResult, Outcome, Player, Selection,
};
