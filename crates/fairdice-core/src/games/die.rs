//! Six-sided dice with arbitrary face values.

use crate::crypto::SecureRandom;
use crate::error::{DiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of faces on every die in the game
pub const FACES: usize = 6;

/// Minimum number of dice a game needs
pub const MIN_DICE: usize = 3;

/// An immutable die with six faces
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct Die {
    faces: [u64; FACES],
}

impl Die {
    /// Create a die from exactly six face values
    pub fn new(values: Vec<u64>) -> Result<Self> {
        let faces: [u64; FACES] = values.try_into().map_err(|v: Vec<u64>| DiceError::InvalidDieSpec {
            spec: join_faces(&v),
            reason: format!("Each die needs exactly {} numbers, got {}", FACES, v.len()),
        })?;
        Ok(Self { faces })
    }

    /// All face values in order
    pub fn faces(&self) -> &[u64] {
        &self.faces
    }

    /// Value of the face at `index`
    pub fn face_at(&self, index: usize) -> Result<u64> {
        self.faces.get(index).copied().ok_or(DiceError::IndexOutOfRange {
            index,
            len: FACES,
        })
    }

    /// Roll locally. Each face position comes up with probability 1/6.
    pub fn roll<R: SecureRandom + ?Sized>(&self, rng: &mut R) -> Result<u64> {
        let index = rng.uniform_below(FACES as u64)? as usize;
        self.face_at(index)
    }
}

impl AsRef<[u64]> for Die {
    fn as_ref(&self) -> &[u64] {
        &self.faces
    }
}

impl TryFrom<Vec<u64>> for Die {
    type Error = DiceError;

    fn try_from(values: Vec<u64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Die> for Vec<u64> {
    fn from(die: Die) -> Self {
        die.faces.to_vec()
    }
}

impl FromStr for Die {
    type Err = DiceError;

    /// Parse `"a,b,c,d,e,f"`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| DiceError::InvalidDieSpec {
            spec: s.to_string(),
            reason,
        };

        let values = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("'{}' is not a non-negative integer", token)))
            })
            .collect::<Result<Vec<u64>>>()?;

        if values.len() != FACES {
            return Err(invalid(format!(
                "Each die needs exactly {} numbers, got {}",
                FACES,
                values.len()
            )));
        }
        Self::new(values)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join_faces(&self.faces).replace(',', ", "))
    }
}

fn join_faces(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a full set of dice definitions, requiring at least `min` dice.
///
/// The count is checked first so an empty or short list is reported as such
/// rather than as a malformed die.
pub fn parse_dice<S: AsRef<str>>(specs: &[S], min: usize) -> Result<Vec<Die>> {
    if specs.len() < min {
        return Err(DiceError::NotEnoughDice {
            found: specs.len(),
            required: min,
        });
    }
    specs.iter().map(|s| s.as_ref().parse()).collect()
}
