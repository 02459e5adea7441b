//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique game identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Create a new random game ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant in a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    /// The committing side, run by this process
    Computer,
    /// The counterpart supplying its own numbers
    User,
}

impl Player {
    /// Get the opponent
    pub fn opponent(&self) -> Player {
        match self {
            Player::Computer => Player::User,
            Player::User => Player::Computer,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Computer => write!(f, "computer"),
            Player::User => write!(f, "user"),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    ComputerWins,
    UserWins,
    Draw,
}

impl GameResult {
    /// Strictly greater face wins, equal faces draw
    pub fn from_faces(computer: u64, user: u64) -> Self {
        match user.cmp(&computer) {
            std::cmp::Ordering::Greater => GameResult::UserWins,
            std::cmp::Ordering::Less => GameResult::ComputerWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::ComputerWins => Some(Player::Computer),
            GameResult::UserWins => Some(Player::User),
            GameResult::Draw => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::ComputerWins => "Computer wins",
            GameResult::UserWins => "User wins",
            GameResult::Draw => "Draw",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which coin flip of the game a message belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    /// Decides who selects a die first
    FirstMove,
    /// Face index on the computer's die
    ComputerRoll,
    /// Face index on the user's die
    UserRoll,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::FirstMove => write!(f, "first move"),
            Round::ComputerRoll => write!(f, "computer roll"),
            Round::UserRoll => write!(f, "user roll"),
        }
    }
}

/// States of a game session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    SelectFirstMover,
    SelectDice,
    RollComputer,
    RollUser,
    Resolve,
    Terminated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_generation() {
        let id1 = GameId::new();
        let id2 = GameId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_game_id_parse() {
        let id = GameId::new();
        let parsed: GameId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<GameId>().is_err());
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Computer.opponent(), Player::User);
        assert_eq!(Player::User.opponent(), Player::Computer);
    }

    #[test]
    fn test_result_from_faces() {
        assert_eq!(GameResult::from_faces(3, 5), GameResult::UserWins);
        assert_eq!(GameResult::from_faces(5, 3), GameResult::ComputerWins);
        assert_eq!(GameResult::from_faces(4, 4), GameResult::Draw);
        assert_eq!(GameResult::Draw.winner(), None);
        assert_eq!(GameResult::UserWins.winner(), Some(Player::User));
    }

    #[test]
    fn test_game_result_str() {
        assert_eq!(GameResult::ComputerWins.as_str(), "Computer wins");
        assert_eq!(GameResult::UserWins.as_str(), "User wins");
        assert_eq!(GameResult::Draw.as_str(), "Draw");
    }
}
