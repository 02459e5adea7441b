//! Game session state machine.
//!
//! SelectFirstMover -> SelectDice -> RollComputer -> RollUser -> Resolve -> Terminated
//!
//! Every prompt may be answered with Help, which shows the probability table
//! and asks again without leaving the state, or Cancel, which terminates the
//! game at once. A coin flip cancelled before it is combined is dropped
//! without revealing its key.

use super::counterpart::{Counterpart, GameEvent, Selection};
use crate::config::{DieStrategy, GameConfig};
use crate::crypto::{CoflipResult, FairCoflip, SecureRandom};
use crate::error::{DiceError, Result};
use crate::games::{best_response, Die, ProbabilityMatrix};
use crate::protocol::{CommitMessage, GameId, GameResult, GameState, Player, RevealMessage, Round};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything needed to audit a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub game_id: GameId,
    pub first_mover: Player,
    pub first_move: CoflipResult,
    pub computer_die: Die,
    pub user_die: Die,
    pub computer_roll: CoflipResult,
    pub user_roll: CoflipResult,
    pub computer_face: u64,
    pub user_face: u64,
    pub result: GameResult,
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Finished(Box<GameReport>),
    /// The counterpart asked to stop while the game was in `at`
    Cancelled { at: GameState },
}

/// One game between this process and a counterpart
pub struct GameProtocol<R> {
    game_id: GameId,
    config: GameConfig,
    all_dice: Vec<Die>,
    pool: Vec<Die>,
    rng: R,
    state: GameState,
}

impl<R: SecureRandom> GameProtocol<R> {
    /// Set up a game over `dice`.
    ///
    /// Fails with `NotEnoughDice` before any coin flip when fewer than
    /// `config.min_dice` dice are given. Two dice are always required.
    pub fn new(dice: Vec<Die>, config: GameConfig, rng: R) -> Result<Self> {
        let required = config.min_dice.max(2);
        if dice.len() < required {
            return Err(DiceError::NotEnoughDice {
                found: dice.len(),
                required,
            });
        }
        Ok(Self {
            game_id: GameId::new(),
            config,
            pool: dice.clone(),
            all_dice: dice,
            rng,
            state: GameState::SelectFirstMover,
        })
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Dice not yet taken by either side
    pub fn available_dice(&self) -> &[Die] {
        &self.pool
    }

    /// Drive the game to completion or cancellation.
    ///
    /// A session plays at most once. Any error ends it in `Terminated`, and
    /// running a terminated session fails with `GameTerminated`.
    pub fn run<C: Counterpart + ?Sized>(&mut self, counterpart: &mut C) -> Result<Outcome> {
        if self.state == GameState::Terminated {
            return Err(DiceError::GameTerminated);
        }
        info!(game_id = %self.game_id, dice = self.all_dice.len(), "game started");

        let outcome = self.play(counterpart);
        if let Err(err) = &outcome {
            warn!(game_id = %self.game_id, state = ?self.state, error = %err, "game aborted");
            self.state = GameState::Terminated;
        }
        outcome
    }

    fn play<C: Counterpart + ?Sized>(&mut self, counterpart: &mut C) -> Result<Outcome> {
        self.enter(GameState::SelectFirstMover);
        let Some(first_move) = self.flip(Round::FirstMove, 2, counterpart)? else {
            return Ok(self.cancel(counterpart));
        };
        // Even sum means the counterpart guessed the committed bit.
        let first_mover = if first_move.combined_index == 0 {
            Player::User
        } else {
            Player::Computer
        };
        info!(game_id = %self.game_id, %first_mover, "first mover decided");
        counterpart.announce(&GameEvent::FirstMover { player: first_mover });

        self.enter(GameState::SelectDice);
        let Some((computer_die, user_die)) = self.select_dice(first_mover, counterpart)? else {
            return Ok(self.cancel(counterpart));
        };

        self.enter(GameState::RollComputer);
        let Some((computer_roll, computer_face)) =
            self.roll(Round::ComputerRoll, Player::Computer, &computer_die, counterpart)?
        else {
            return Ok(self.cancel(counterpart));
        };

        self.enter(GameState::RollUser);
        let Some((user_roll, user_face)) = self.roll(Round::UserRoll, Player::User, &user_die, counterpart)?
        else {
            return Ok(self.cancel(counterpart));
        };

        self.enter(GameState::Resolve);
        let result = GameResult::from_faces(computer_face, user_face);
        info!(game_id = %self.game_id, computer_face, user_face, %result, "game resolved");
        counterpart.announce(&GameEvent::Finished {
            computer_face,
            user_face,
            result,
        });
        self.state = GameState::Terminated;

        Ok(Outcome::Finished(Box::new(GameReport {
            game_id: self.game_id,
            first_mover,
            first_move,
            computer_die,
            user_die,
            computer_roll,
            user_roll,
            computer_face,
            user_face,
            result,
        })))
    }

    fn enter(&mut self, state: GameState) {
        debug!(game_id = %self.game_id, state = ?state, "entering state");
        self.state = state;
    }

    /// Roll `die` for `player` through a coin flip over its face count
    fn roll<C: Counterpart + ?Sized>(
        &mut self,
        round: Round,
        player: Player,
        die: &Die,
        counterpart: &mut C,
    ) -> Result<Option<(CoflipResult, u64)>> {
        let Some(flip) = self.flip(round, die.faces().len() as u64, counterpart)? else {
            return Ok(None);
        };
        let index = flip.combined_index;
        let face = die.face_at(index as usize)?;
        info!(game_id = %self.game_id, %player, index, face, "die rolled");
        counterpart.announce(&GameEvent::Rolled {
            player,
            index,
            face,
        });
        Ok(Some((flip, face)))
    }

    /// Run one coin flip: commit, wait for a valid number, reveal.
    ///
    /// Returns `None` if the counterpart cancels first.
    fn flip<C: Counterpart + ?Sized>(
        &mut self,
        round: Round,
        bound: u64,
        counterpart: &mut C,
    ) -> Result<Option<CoflipResult>> {
        let mut flip = FairCoflip::start(&mut self.rng, bound)?;
        let commit = CommitMessage {
            game_id: self.game_id,
            round,
            bound,
            digest: flip.digest(),
        };
        debug!(game_id = %self.game_id, %round, bound, digest = %commit.digest, "commitment published");
        counterpart.publish_commitment(&commit);

        loop {
            match counterpart.choose_number(round, bound) {
                Selection::Cancel => {
                    debug!(game_id = %self.game_id, %round, "round cancelled, key withheld");
                    return Ok(None);
                }
                Selection::Help => self.show_help(&self.all_dice, counterpart),
                Selection::Pick(value) => match flip.combine(value) {
                    Ok(result) => {
                        let reveal = RevealMessage::from_result(self.game_id, round, &result);
                        counterpart.publish_reveal(&reveal);
                        if self.config.verify_reveals {
                            counterpart.announce(&GameEvent::RevealChecked {
                                round,
                                valid: reveal.verify(&commit),
                            });
                        }
                        return Ok(Some(result));
                    }
                    Err(err @ DiceError::OutOfRange { .. }) => {
                        counterpart.announce(&GameEvent::InvalidSelection {
                            value,
                            reason: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err),
                },
            }
        }
    }

    /// First mover takes a die, the other side picks from what is left.
    ///
    /// Returns `(computer_die, user_die)`, or `None` on cancellation.
    fn select_dice<C: Counterpart + ?Sized>(
        &mut self,
        first: Player,
        counterpart: &mut C,
    ) -> Result<Option<(Die, Die)>> {
        match first {
            Player::Computer => {
                let index = self.rng.uniform_below(self.pool.len() as u64)? as usize;
                let computer = self.take(index, Player::Computer, counterpart);
                let Some(index) = self.prompt_die(Some(&computer), counterpart)? else {
                    return Ok(None);
                };
                let user = self.take(index, Player::User, counterpart);
                Ok(Some((computer, user)))
            }
            Player::User => {
                let Some(index) = self.prompt_die(None, counterpart)? else {
                    return Ok(None);
                };
                let user = self.take(index, Player::User, counterpart);
                let index = self.respond_to(&user)?;
                let computer = self.take(index, Player::Computer, counterpart);
                Ok(Some((computer, user)))
            }
        }
    }

    /// Ask the counterpart for an index into the pool until it gives a valid one.
    ///
    /// Help covers the pool plus `against`, the die the computer already holds.
    fn prompt_die<C: Counterpart + ?Sized>(
        &mut self,
        against: Option<&Die>,
        counterpart: &mut C,
    ) -> Result<Option<usize>> {
        loop {
            match counterpart.choose_die(&self.pool) {
                Selection::Cancel => return Ok(None),
                Selection::Help => {
                    let mut shown = self.pool.clone();
                    shown.extend(against.cloned());
                    self.show_help(&shown, counterpart);
                }
                Selection::Pick(value) => match usize::try_from(value) {
                    Ok(index) if index < self.pool.len() => return Ok(Some(index)),
                    _ => counterpart.announce(&GameEvent::InvalidSelection {
                        value,
                        reason: DiceError::OutOfRange {
                            value,
                            bound: self.pool.len() as u64,
                        }
                        .to_string(),
                    }),
                },
            }
        }
    }

    /// Computer's pick when the user already holds `user_die`
    fn respond_to(&mut self, user_die: &Die) -> Result<usize> {
        match self.config.strategy {
            DieStrategy::Random => Ok(self.rng.uniform_below(self.pool.len() as u64)? as usize),
            DieStrategy::BestResponse => {
                let mut candidates = self.pool.clone();
                candidates.push(user_die.clone());
                let against = candidates.len() - 1;
                best_response(&candidates, against).ok_or(DiceError::NotEnoughDice {
                    found: self.pool.len(),
                    required: 1,
                })
            }
        }
    }

    /// Remove a die from the pool for good
    fn take<C: Counterpart + ?Sized>(&mut self, index: usize, player: Player, counterpart: &mut C) -> Die {
        let die = self.pool.remove(index);
        info!(game_id = %self.game_id, %player, die = %die, "die selected");
        counterpart.announce(&GameEvent::DieSelected {
            player,
            die: die.clone(),
        });
        die
    }

    fn show_help<C: Counterpart + ?Sized>(&self, dice: &[Die], counterpart: &mut C) {
        debug!(game_id = %self.game_id, dice = dice.len(), "probability table requested");
        counterpart.show_probabilities(dice, &ProbabilityMatrix::compute(dice));
    }

    fn cancel<C: Counterpart + ?Sized>(&mut self, counterpart: &mut C) -> Outcome {
        let at = self.state;
        info!(game_id = %self.game_id, state = ?at, "game cancelled");
        self.state = GameState::Terminated;
        counterpart.announce(&GameEvent::Cancelled);
        Outcome::Cancelled { at }
    }
}
