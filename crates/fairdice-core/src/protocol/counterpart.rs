//! Counterpart trait definition.

use crate::games::{Die, ProbabilityMatrix};
use crate::protocol::{CommitMessage, GameResult, Player, RevealMessage, Round};
use serde::{Deserialize, Serialize};

/// Answer to a prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// A number or a die index
    Pick(i64),
    /// Show the probability table, then ask again
    Help,
    /// Stop the game
    Cancel,
}

/// Things that happen during a game, for narration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FirstMover { player: Player },
    DieSelected { player: Player, die: Die },
    Rolled { player: Player, index: u64, face: u64 },
    InvalidSelection { value: i64, reason: String },
    RevealChecked { round: Round, valid: bool },
    Finished { computer_face: u64, user_face: u64, result: GameResult },
    Cancelled,
}

/// The other side of the game
///
/// Implementations can be:
/// - a terminal front end reading the user's answers
/// - ScriptedCounterpart replaying fixed answers in tests
pub trait Counterpart {
    /// Receive a digest before being asked for a number
    fn publish_commitment(&mut self, commit: &CommitMessage);

    /// Pick a number in `[0, bound)` for the given round
    fn choose_number(&mut self, round: Round, bound: u64) -> Selection;

    /// Pick one of the offered dice by index
    fn choose_die(&mut self, available: &[Die]) -> Selection;

    /// Display win probabilities for `dice`
    fn show_probabilities(&mut self, dice: &[Die], matrix: &ProbabilityMatrix);

    /// Receive the key and value once the round is combined
    fn publish_reveal(&mut self, reveal: &RevealMessage);

    /// Narration hook
    fn announce(&mut self, _event: &GameEvent) {}
}

impl<C: Counterpart + ?Sized> Counterpart for &mut C {
    fn publish_commitment(&mut self, commit: &CommitMessage) {
        (**self).publish_commitment(commit)
    }

    fn choose_number(&mut self, round: Round, bound: u64) -> Selection {
        (**self).choose_number(round, bound)
    }

    fn choose_die(&mut self, available: &[Die]) -> Selection {
        (**self).choose_die(available)
    }

    fn show_probabilities(&mut self, dice: &[Die], matrix: &ProbabilityMatrix) {
        (**self).show_probabilities(dice, matrix)
    }

    fn publish_reveal(&mut self, reveal: &RevealMessage) {
        (**self).publish_reveal(reveal)
    }

    fn announce(&mut self, event: &GameEvent) {
        (**self).announce(event)
    }
}
