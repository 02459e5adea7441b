//! Integration tests for the full game flow.
//!
//! These tests drive complete sessions through a scripted counterpart.

use fairdice_core::{
    config::{DieStrategy, GameConfig},
    crypto::{CommitPhase, FairCoflip, FairCommitment, SecureRandom, SeededRandom},
    games::{parse_dice, Die, ProbabilityMatrix, WinProbability, MIN_DICE},
    protocol::{
        GameEvent, GameProtocol, GameResult, GameState, Outcome, Player, Round,
        ScriptedCounterpart, Selection,
    },
    DiceError,
};

/// Random source that only ever yields zero bytes.
///
/// Every committed value is 0 and every computer die pick is index 0, so the
/// counterpart's answers alone decide each combined index.
struct ZeroRandom;

impl SecureRandom for ZeroRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> fairdice_core::Result<()> {
        dest.fill(0);
        Ok(())
    }
}

/// Random source whose device is gone
struct DeadDevice;

impl SecureRandom for DeadDevice {
    fn fill_bytes(&mut self, _dest: &mut [u8]) -> fairdice_core::Result<()> {
        Err(DiceError::EntropyUnavailable("no entropy device".to_string()))
    }
}

const NONTRANSITIVE: [&str; 3] = ["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"];

fn dice(specs: &[&str]) -> Vec<Die> {
    parse_dice(specs, MIN_DICE).unwrap()
}

fn finished(outcome: Outcome) -> fairdice_core::protocol::GameReport {
    match outcome {
        Outcome::Finished(report) => *report,
        other => panic!("expected a finished game, got {other:?}"),
    }
}

#[test]
fn test_four_identical_dice_full_game() {
    let set = dice(&["1,2,3,4,5,6"; 4]);
    let matrix = ProbabilityMatrix::compute(&set);
    for i in 0..4 {
        for j in 0..4 {
            let expected = (i != j).then_some(WinProbability { wins: 15, total: 36 });
            assert_eq!(matrix.get(i, j), expected);
        }
    }

    let mut game = GameProtocol::new(set, GameConfig::default(), SeededRandom::new(17)).unwrap();
    let mut cp = ScriptedCounterpart::picks(&[1, 2, 0, 5]);
    let report = finished(game.run(&mut cp).unwrap());

    assert_eq!(report.computer_die, report.user_die);
    assert_eq!(game.available_dice().len(), 2);
    assert_eq!(cp.remaining(), 0);
}

#[test]
fn test_user_guesses_bit_and_selects_first() {
    let config = GameConfig {
        strategy: DieStrategy::BestResponse,
        ..GameConfig::default()
    };
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), config, ZeroRandom).unwrap();
    // Guess 0 matches the committed 0, user takes die 0.
    let mut cp = ScriptedCounterpart::picks(&[0, 0, 4, 4]);
    let report = finished(game.run(&mut cp).unwrap());

    assert_eq!(report.first_mover, Player::User);
    assert_eq!(report.user_die.to_string(), "[2, 2, 4, 4, 9, 9]");
    // Only die C beats die A more often than not.
    assert_eq!(report.computer_die.to_string(), "[3, 3, 5, 5, 7, 7]");
    assert_eq!(cp.offered.len(), 1);
    assert_eq!(cp.offered[0].len(), 3);

    assert_eq!(report.computer_face, 7);
    assert_eq!(report.user_face, 9);
    assert_eq!(report.result, GameResult::UserWins);
}

#[test]
fn test_computer_selects_first_and_die_is_removed() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), ZeroRandom).unwrap();
    let mut cp = ScriptedCounterpart::picks(&[1, 1, 0, 0]);
    let report = finished(game.run(&mut cp).unwrap());

    assert_eq!(report.first_mover, Player::Computer);
    assert_eq!(report.computer_die.to_string(), "[2, 2, 4, 4, 9, 9]");
    // The computer's die is no longer offered.
    assert_eq!(cp.offered[0].len(), 2);
    assert!(!cp.offered[0].contains(&report.computer_die));
    assert_eq!(report.user_die.to_string(), "[3, 3, 5, 5, 7, 7]");

    assert_eq!(report.computer_face, 2);
    assert_eq!(report.user_face, 3);
    assert_eq!(report.result, GameResult::UserWins);
}

#[test]
fn test_equal_faces_are_a_draw() {
    let set = dice(&["1,2,3,4,5,6", "6,5,4,3,2,1", "3,3,3,3,3,3"]);
    let mut game = GameProtocol::new(set, GameConfig::default(), ZeroRandom).unwrap();
    // Computer first takes die 0; user takes [6,5,4,3,2,1]; faces 3 and 3.
    let mut cp = ScriptedCounterpart::picks(&[1, 0, 2, 3]);
    let report = finished(game.run(&mut cp).unwrap());

    assert_eq!(report.computer_face, 3);
    assert_eq!(report.user_face, 3);
    assert_eq!(report.result, GameResult::Draw);
    assert_eq!(report.result.winner(), None);
    assert!(cp.events.contains(&GameEvent::Finished {
        computer_face: 3,
        user_face: 3,
        result: GameResult::Draw,
    }));
}

#[test]
fn test_help_during_selection_shows_pool_and_reprompts() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), ZeroRandom).unwrap();
    let mut cp = ScriptedCounterpart::new([
        Selection::Pick(1),
        Selection::Help,
        Selection::Pick(7),
        Selection::Pick(0),
        Selection::Pick(0),
        Selection::Pick(0),
    ]);
    finished(game.run(&mut cp).unwrap());

    // The table covers the offered dice and the die the computer already holds.
    assert_eq!(cp.tables.len(), 1);
    assert_eq!(cp.tables[0].len(), 3);
    // Same prompt issued three times: help, bad index, good index.
    assert_eq!(cp.offered.len(), 3);
    assert!(cp.offered.windows(2).all(|w| w[0] == w[1]));
    assert!(cp
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::InvalidSelection { value: 7, .. })));
}

#[test]
fn test_cancel_during_selection() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), ZeroRandom).unwrap();
    let mut cp = ScriptedCounterpart::new([Selection::Pick(1), Selection::Cancel]);
    let outcome = game.run(&mut cp).unwrap();

    assert_eq!(outcome, Outcome::Cancelled { at: GameState::SelectDice });
    assert_eq!(game.state(), GameState::Terminated);
}

#[test]
fn test_cancel_mid_roll_withholds_pending_key() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), SeededRandom::new(3)).unwrap();
    let mut cp = ScriptedCounterpart::new([Selection::Pick(0), Selection::Pick(0), Selection::Cancel]);
    let outcome = game.run(&mut cp).unwrap();

    assert_eq!(outcome, Outcome::Cancelled { at: GameState::RollComputer });
    // Two digests published, only the first-move key revealed.
    assert_eq!(cp.commits.len(), 2);
    assert_eq!(cp.reveals.len(), 1);
    assert_eq!(cp.commits[1].round, Round::ComputerRoll);
    assert_eq!(cp.reveals[0].round, Round::FirstMove);
}

#[test]
fn test_every_reveal_matches_its_commit() {
    for seed in 0..20 {
        let mut game =
            GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), SeededRandom::new(seed)).unwrap();
        let mut cp = ScriptedCounterpart::picks(&[(seed % 2) as i64, 0, 5, 1]);
        let report = finished(game.run(&mut cp).unwrap());

        assert_eq!(cp.commits.len(), 3);
        for (commit, reveal) in cp.commits.iter().zip(&cp.reveals) {
            assert!(reveal.verify(commit), "seed {seed}: reveal does not match");
        }
        assert_eq!(
            cp.number_prompts,
            vec![(Round::FirstMove, 2), (Round::ComputerRoll, 6), (Round::UserRoll, 6)]
        );
        assert_eq!(report.game_id, cp.commits[0].game_id);
    }
}

#[test]
fn test_invalid_inputs_rejected_before_any_round() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        parse_dice(&empty, MIN_DICE),
        Err(DiceError::NotEnoughDice { found: 0, .. })
    ));
    assert!(matches!(
        parse_dice(&["1,2,3,4,5,6", "1,2,3,4,5,6"], MIN_DICE),
        Err(DiceError::NotEnoughDice { found: 2, .. })
    ));
    assert!(matches!(
        parse_dice(&["1,2,3,4,5,6", "1,2,3,4,5", "1,2,3,4,5,6"], MIN_DICE),
        Err(DiceError::InvalidDieSpec { .. })
    ));
    assert!(matches!(
        parse_dice(&["1,2,3,4,5,6", "1,2,3,4,5,six", "1,2,3,4,5,6"], MIN_DICE),
        Err(DiceError::InvalidDieSpec { .. })
    ));
}

#[test]
fn test_out_of_range_leaves_secret_unrevealed() {
    let mut flip = FairCoflip::start(&mut SeededRandom::new(1), 6).unwrap();
    assert!(matches!(flip.combine(6), Err(DiceError::OutOfRange { .. })));
    assert!(matches!(flip.combine(-3), Err(DiceError::OutOfRange { .. })));
    assert_eq!(flip.phase(), CommitPhase::Open);
}

#[test]
fn test_cancel_at_selection_when_user_selects_first() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), ZeroRandom).unwrap();
    let mut cp = ScriptedCounterpart::new([Selection::Pick(0), Selection::Cancel]);
    let outcome = game.run(&mut cp).unwrap();

    assert_eq!(outcome, Outcome::Cancelled { at: GameState::SelectDice });
    assert!(cp.events.contains(&GameEvent::FirstMover { player: Player::User }));
    assert!(!cp
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::DieSelected { .. })));
    assert_eq!(game.available_dice().len(), 3);
    assert_eq!(game.state(), GameState::Terminated);
}

#[test]
fn test_cancel_at_user_roll_withholds_last_key() {
    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), SeededRandom::new(6)).unwrap();
    let mut cp = ScriptedCounterpart::new([
        Selection::Pick(1),
        Selection::Pick(0),
        Selection::Pick(2),
        Selection::Cancel,
    ]);
    let outcome = game.run(&mut cp).unwrap();

    assert_eq!(outcome, Outcome::Cancelled { at: GameState::RollUser });
    assert_eq!(cp.commits.len(), 3);
    assert_eq!(cp.reveals.len(), 2);
    assert_eq!(cp.commits[2].round, Round::UserRoll);
    assert!(cp.reveals.iter().all(|r| r.round != Round::UserRoll));
    for (commit, reveal) in cp.commits.iter().zip(&cp.reveals) {
        assert!(reveal.verify(commit));
    }
    assert!(!cp.events.iter().any(|e| matches!(
        e,
        GameEvent::Rolled {
            player: Player::User,
            ..
        }
    )));
}

#[test]
fn test_dead_entropy_device_is_fatal() {
    assert!(matches!(
        FairCommitment::open(&mut DeadDevice, 6),
        Err(DiceError::EntropyUnavailable(_))
    ));
    assert!(matches!(
        FairCoflip::start(&mut DeadDevice, 2),
        Err(DiceError::EntropyUnavailable(_))
    ));

    let mut game = GameProtocol::new(dice(&NONTRANSITIVE), GameConfig::default(), DeadDevice).unwrap();
    let mut cp = ScriptedCounterpart::picks(&[0, 0, 0, 0]);
    assert!(matches!(game.run(&mut cp), Err(DiceError::EntropyUnavailable(_))));
    assert!(cp.commits.is_empty());
    assert!(cp.number_prompts.is_empty());
    assert_eq!(game.state(), GameState::Terminated);
    assert_eq!(game.run(&mut cp), Err(DiceError::GameTerminated));
}
