//! Terminal counterpart: prompts the user and narrates the game.

use crate::table;
use crate::transcript::Transcript;
use fairdice_core::protocol::{
    CommitMessage, Counterpart, GameEvent, GameResult, Player, RevealMessage, Round, Selection,
    TranscriptEntry,
};
use fairdice_core::{Die, ProbabilityMatrix};
use std::io::{BufRead, Write};
use tracing::warn;

/// Reads answers from `input` and writes narration to `output`
pub struct TerminalCounterpart<R, W, T: Write> {
    input: R,
    output: W,
    transcript: Option<Transcript<T>>,
}

impl<R: BufRead, W: Write, T: Write> TerminalCounterpart<R, W, T> {
    pub fn new(input: R, output: W, transcript: Option<Transcript<T>>) -> Self {
        Self {
            input,
            output,
            transcript,
        }
    }

    pub fn transcript_mut(&mut self) -> Option<&mut Transcript<T>> {
        self.transcript.as_mut()
    }

    fn say(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.output, "{}", text.as_ref()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    fn record(&mut self, entry: TranscriptEntry) {
        if let Some(transcript) = self.transcript.as_mut() {
            if let Err(e) = transcript.record(&entry) {
                warn!(error = %e, "failed to write transcript");
            }
        }
    }

    /// Show numbered options and read one answer.
    ///
    /// End of input counts as a request to exit.
    fn prompt(&mut self, options: &[String]) -> Selection {
        loop {
            for (i, option) in options.iter().enumerate() {
                self.say(format!("{} - {}", i, option));
            }
            self.say("X - exit");
            self.say("? - help");
            let _ = write!(self.output, "Your selection: ");
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Selection::Cancel,
                Ok(_) => {}
            }
            match parse_answer(&line) {
                Some(selection) => return selection,
                None => self.say(format!("'{}' is not an option, try again.", line.trim())),
            }
        }
    }
}

/// `?` for help, `x` to exit, otherwise an integer
pub fn parse_answer(line: &str) -> Option<Selection> {
    let answer = line.trim().to_ascii_lowercase();
    match answer.as_str() {
        "?" => Some(Selection::Help),
        "x" => Some(Selection::Cancel),
        other => other.parse::<i64>().ok().map(Selection::Pick),
    }
}

impl<R: BufRead, W: Write, T: Write> Counterpart for TerminalCounterpart<R, W, T> {
    fn publish_commitment(&mut self, commit: &CommitMessage) {
        match commit.round {
            Round::FirstMove => self.say(format!(
                "Let's decide who picks a die first. I selected a random value in 0..{} (HMAC={}).",
                commit.bound - 1,
                commit.digest
            )),
            _ => self.say(format!(
                "I selected a random value in 0..{} (HMAC={}).",
                commit.bound - 1,
                commit.digest
            )),
        }
        self.record(TranscriptEntry::Commit(commit.clone()));
    }

    fn choose_number(&mut self, round: Round, bound: u64) -> Selection {
        match round {
            Round::FirstMove => self.say("Try to guess my selection."),
            _ => self.say(format!("Add your number modulo {}.", bound)),
        }
        let options: Vec<String> = (0..bound).map(|n| n.to_string()).collect();
        self.prompt(&options)
    }

    fn choose_die(&mut self, available: &[Die]) -> Selection {
        self.say("Choose your die:");
        let options: Vec<String> = available.iter().map(Die::to_string).collect();
        self.prompt(&options)
    }

    fn show_probabilities(&mut self, dice: &[Die], matrix: &ProbabilityMatrix) {
        self.say("Probability of the win for the user:");
        self.say(table::render(dice, matrix));
    }

    fn publish_reveal(&mut self, reveal: &RevealMessage) {
        self.say(format!(
            "My selection: {} (KEY={}).",
            reveal.committed_value, reveal.key
        ));
        if reveal.round != Round::FirstMove {
            self.say(format!(
                "The fair number generation result is {} + {} = {} (mod {}).",
                reveal.committed_value, reveal.counterpart_value, reveal.combined_index, reveal.bound
            ));
        }
        self.record(TranscriptEntry::Reveal(reveal.clone()));
    }

    fn announce(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FirstMover { player: Player::User } => {
                self.say("You guessed right, you choose the first die.")
            }
            GameEvent::FirstMover { player: Player::Computer } => {
                self.say("I make the first move and choose my die.")
            }
            GameEvent::DieSelected { player: Player::Computer, die } => {
                self.say(format!("I choose the {} die.", die))
            }
            GameEvent::DieSelected { player: Player::User, die } => {
                self.say(format!("You choose the {} die.", die))
            }
            GameEvent::Rolled { player: Player::Computer, face, .. } => {
                self.say(format!("My roll result is {}.", face))
            }
            GameEvent::Rolled { player: Player::User, face, .. } => {
                self.say(format!("Your roll result is {}.", face))
            }
            GameEvent::InvalidSelection { reason, .. } => {
                self.say(format!("{}. Try again.", reason))
            }
            GameEvent::RevealChecked { round, valid: true } => {
                self.say(format!("Verified: the {} key matches the published HMAC.", round))
            }
            GameEvent::RevealChecked { round, valid: false } => {
                self.say(format!("WARNING: the {} key does NOT match the published HMAC!", round))
            }
            GameEvent::Finished {
                computer_face,
                user_face,
                result,
            } => match result {
                GameResult::UserWins => self.say(format!("You win ({} > {})!", user_face, computer_face)),
                GameResult::ComputerWins => self.say(format!("I win ({} > {})!", computer_face, user_face)),
                GameResult::Draw => self.say(format!("It's a draw ({} = {}).", user_face, computer_face)),
            },
            GameEvent::Cancelled => self.say("You left the game. Bye!"),
        }
    }
}
