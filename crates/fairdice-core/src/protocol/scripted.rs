//! Scripted counterpart for testing.

use super::counterpart::{Counterpart, GameEvent, Selection};
use crate::games::{Die, ProbabilityMatrix};
use crate::protocol::{CommitMessage, RevealMessage, Round};
use std::collections::VecDeque;

/// Replays a fixed list of answers and records everything it is sent
#[derive(Clone, Debug, Default)]
pub struct ScriptedCounterpart {
    answers: VecDeque<Selection>,
    /// Digests received, in order
    pub commits: Vec<CommitMessage>,
    /// Reveals received, in order
    pub reveals: Vec<RevealMessage>,
    /// Narration received, in order
    pub events: Vec<GameEvent>,
    /// Dice offered at each die prompt
    pub offered: Vec<Vec<Die>>,
    /// Rounds asked for a number, with their bounds
    pub number_prompts: Vec<(Round, u64)>,
    /// Probability tables shown
    pub tables: Vec<ProbabilityMatrix>,
}

impl ScriptedCounterpart {
    /// Answer prompts with `answers` in order; cancels once they run out
    pub fn new(answers: impl IntoIterator<Item = Selection>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Shorthand for a script made only of picks
    pub fn picks(values: &[i64]) -> Self {
        Self::new(values.iter().copied().map(Selection::Pick))
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self) -> Selection {
        self.answers.pop_front().unwrap_or(Selection::Cancel)
    }
}

impl Counterpart for ScriptedCounterpart {
    fn publish_commitment(&mut self, commit: &CommitMessage) {
        self.commits.push(commit.clone());
    }

    fn choose_number(&mut self, round: Round, bound: u64) -> Selection {
        self.number_prompts.push((round, bound));
        self.next_answer()
    }

    fn choose_die(&mut self, available: &[Die]) -> Selection {
        self.offered.push(available.to_vec());
        self.next_answer()
    }

    fn show_probabilities(&mut self, _dice: &[Die], matrix: &ProbabilityMatrix) {
        self.tables.push(matrix.clone());
    }

    fn publish_reveal(&mut self, reveal: &RevealMessage) {
        self.reveals.push(reveal.clone());
    }

    fn announce(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
