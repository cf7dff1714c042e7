//! Position evaluation.
//!
//! Scores a game state from a fixed player's perspective using one of the
//! heuristics in [`heuristic`]. Positive scores favor the perspective player.

pub mod heuristic;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Player};

/// Evaluation and search score.
pub type Score = i32;

/// Score of a won position at the root. Terminal scores are adjusted by ply
/// so that faster wins and slower losses are preferred. Every heuristic stays
/// far below this in magnitude.
pub const WIN_SCORE: Score = 1_000_000_000;

/// The available evaluation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    E0,
    E1,
    #[default]
    E2,
}

pub const ALL_HEURISTICS: [Heuristic; 3] = [Heuristic::E0, Heuristic::E1, Heuristic::E2];

impl Heuristic {
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::E0 => "e0",
            Heuristic::E1 => "e1",
            Heuristic::E2 => "e2",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e0" => Ok(Heuristic::E0),
            "e1" => Ok(Heuristic::E1),
            "e2" => Ok(Heuristic::E2),
            _ => Err(format!("unknown heuristic '{}' (expected e0, e1 or e2)", s)),
        }
    }
}

/// Evaluates `state` for `perspective` with the chosen heuristic.
#[inline]
pub fn evaluate(heuristic: Heuristic, state: &GameState, perspective: Player) -> Score {
    match heuristic {
        Heuristic::E0 => heuristic::e0(&state.board, perspective),
        Heuristic::E1 => heuristic::e1(&state.board, perspective),
        Heuristic::E2 => heuristic::e2(&state.board, perspective),
    }
}
