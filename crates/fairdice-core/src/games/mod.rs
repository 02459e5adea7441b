//! Dice and their win probabilities.

mod die;
mod probability;

pub use die::{parse_dice, Die, FACES, MIN_DICE};
pub use probability::{best_response, ProbabilityMatrix, WinProbability};
