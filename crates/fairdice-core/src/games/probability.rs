//! Pairwise win probabilities between dice.
//!
//! P(i beats j) = #{(a, b) : a in faces(i), b in faces(j), a > b} / (|i| * |j|)
//!
//! Ties count for neither side.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Exact win probability `wins / total`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinProbability {
    pub wins: u64,
    pub total: u64,
}

impl WinProbability {
    /// Count strict wins of `row` over `col` across every face pairing
    pub fn between(row: &[u64], col: &[u64]) -> Self {
        let wins = row
            .iter()
            .map(|a| col.iter().filter(|b| a > b).count() as u64)
            .sum();
        Self {
            wins,
            total: (row.len() * col.len()) as u64,
        }
    }

    /// Lowest-terms form
    pub fn reduced(&self) -> Self {
        let g = gcd(self.wins, self.total).max(1);
        Self {
            wins: self.wins / g,
            total: self.total / g,
        }
    }

    pub fn as_f64(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.as_f64() * 100.0
    }

    /// Exact comparison by cross-multiplication
    pub fn cmp_exact(&self, other: &Self) -> Ordering {
        (u128::from(self.wins) * u128::from(other.total))
            .cmp(&(u128::from(other.wins) * u128::from(self.total)))
    }
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Square matrix of win probabilities; the diagonal is not applicable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    cells: Vec<Vec<Option<WinProbability>>>,
}

impl ProbabilityMatrix {
    /// Compute every ordered pair of distinct dice
    pub fn compute<D: AsRef<[u64]>>(dice: &[D]) -> Self {
        let cells = dice
            .iter()
            .enumerate()
            .map(|(i, row)| {
                dice.iter()
                    .enumerate()
                    .map(|(j, col)| {
                        (i != j).then(|| WinProbability::between(row.as_ref(), col.as_ref()))
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Number of dice
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Probability that die `i` beats die `j`; `None` on the diagonal
    pub fn get(&self, i: usize, j: usize) -> Option<WinProbability> {
        self.cells.get(i)?.get(j).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<WinProbability>>] {
        &self.cells
    }
}

/// Index of the die most likely to beat `dice[against]`.
///
/// Ties go to the lowest index. Returns `None` when no other die exists.
pub fn best_response<D: AsRef<[u64]>>(dice: &[D], against: usize) -> Option<usize> {
    let target = dice.get(against)?.as_ref();
    let mut best: Option<(usize, WinProbability)> = None;
    for (i, die) in dice.iter().enumerate() {
        if i == against {
            continue;
        }
        let p = WinProbability::between(die.as_ref(), target);
        match best {
            Some((_, current)) if p.cmp_exact(&current) != Ordering::Greater => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}
