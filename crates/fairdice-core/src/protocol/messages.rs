//! Protocol messages.

use crate::crypto::{combine_mod, CoflipResult, CommitDigest, CommitKey};
use crate::protocol::{GameId, GameResult, Round};
use serde::{Deserialize, Serialize};

/// Published before the counterpart picks its number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub game_id: GameId,
    pub round: Round,
    pub bound: u64,
    pub digest: CommitDigest,
}

/// Published once the counterpart number has been combined
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    pub game_id: GameId,
    pub round: Round,
    pub committed_value: u64,
    pub counterpart_value: u64,
    pub bound: u64,
    pub combined_index: u64,
    pub key: CommitKey,
}

impl RevealMessage {
    pub fn from_result(game_id: GameId, round: Round, result: &CoflipResult) -> Self {
        Self {
            game_id,
            round,
            committed_value: result.committed_value,
            counterpart_value: result.counterpart_value,
            bound: result.bound,
            combined_index: result.combined_index,
            key: result.key.clone(),
        }
    }

    /// Check this reveal against the commitment published for the same round
    pub fn verify(&self, commit: &CommitMessage) -> bool {
        self.game_id == commit.game_id
            && self.round == commit.round
            && self.bound == commit.bound
            && self.committed_value < self.bound
            && self.counterpart_value < self.bound
            && self.combined_index == combine_mod(self.committed_value, self.counterpart_value, self.bound)
            && commit.digest.verify(&self.key, self.committed_value)
    }
}

/// Final line of a game transcript
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    pub game_id: GameId,
    pub computer_face: u64,
    pub user_face: u64,
    pub result: GameResult,
}

/// One line of an auditable game transcript
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Commit(CommitMessage),
    Reveal(RevealMessage),
    Outcome(OutcomeMessage),
}
