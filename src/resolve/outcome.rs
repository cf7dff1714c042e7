//! Terminal-state detection.
//!
//! Decides whether the game is over and who won. Checked in order: the turn
//! limit, elimination (AI destroyed or no units left), and finally a side to
//! move that has no legal action, which loses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Player, RoundLimit};
use crate::movegen::has_any_action;

/// The result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(p) => Some(p),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(p) => write!(f, "{} wins", p),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Returns true if `player` can no longer win: its AI was destroyed or it has
/// no units left.
fn is_eliminated(state: &GameState, player: Player) -> bool {
    state.has_lost_ai(player) || state.board.count_units(player) == 0
}

/// The outcome decided without looking at available actions: turn limit and
/// elimination only.
pub fn settled_outcome(state: &GameState) -> Option<Outcome> {
    if state.turn_limit_reached() {
        return Some(match state.round_limit {
            RoundLimit::Draw => Outcome::Draw,
            RoundLimit::DefenderWins => Outcome::Win(Player::Defender),
        });
    }
    match (
        is_eliminated(state, Player::Attacker),
        is_eliminated(state, Player::Defender),
    ) {
        (false, false) => None,
        (false, true) => Some(Outcome::Win(Player::Attacker)),
        // Mutual destruction goes to the defender.
        (true, _) => Some(Outcome::Win(Player::Defender)),
    }
}

/// The full outcome, or `None` while the game is still running.
pub fn outcome(state: &GameState) -> Option<Outcome> {
    settled_outcome(state).or_else(|| {
        if has_any_action(state) {
            None
        } else {
            Some(Outcome::Win(state.next_player.other()))
        }
    })
}

pub fn is_terminal(state: &GameState) -> bool {
    outcome(state).is_some()
}

/// The winning player, or `None` for a draw or an unfinished game.
pub fn winner(state: &GameState) -> Option<Player> {
    outcome(state).and_then(Outcome::winner)
}
