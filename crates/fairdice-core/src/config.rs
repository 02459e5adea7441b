//! Game configuration.

use crate::games::MIN_DICE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the computer picks its die when it selects second
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DieStrategy {
    /// Uniformly random among the remaining dice
    #[default]
    Random,
    /// The remaining die with the best odds against the user's die
    BestResponse,
}

impl FromStr for DieStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(DieStrategy::Random),
            "best-response" | "best" => Ok(DieStrategy::BestResponse),
            other => Err(format!(
                "unknown strategy '{}', expected 'random' or 'best-response'",
                other
            )),
        }
    }
}

impl fmt::Display for DieStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DieStrategy::Random => write!(f, "random"),
            DieStrategy::BestResponse => write!(f, "best-response"),
        }
    }
}

/// Settings for a game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum number of dice required to start
    pub min_dice: usize,
    /// Computer's die choice when it selects second
    pub strategy: DieStrategy,
    /// Check every reveal against its published digest
    pub verify_reveals: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_dice: MIN_DICE,
            strategy: DieStrategy::Random,
            verify_reveals: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.min_dice, 3);
        assert_eq!(config.strategy, DieStrategy::Random);
        assert!(config.verify_reveals);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("random".parse::<DieStrategy>(), Ok(DieStrategy::Random));
        assert_eq!(
            "Best-Response".parse::<DieStrategy>(),
            Ok(DieStrategy::BestResponse)
        );
        assert!("clever".parse::<DieStrategy>().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"strategy":"best-response"}"#).unwrap();
        assert_eq!(config.strategy, DieStrategy::BestResponse);
        assert_eq!(config.min_dice, 3);
        assert!(config.verify_reveals);
    }
}
