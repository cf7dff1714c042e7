//! Legal action generation.
//!
//! Generates the set of legal actions for the side to move. Order is fixed:
//! units row-major, then each unit's orthogonal targets (up, left, down,
//! right), then its self-destruct. Search relies on this order for
//! reproducible tie-breaking.

pub mod validate;

pub use validate::{classify, validate, IllegalActionError};

use rand::Rng;

use crate::board::{Action, Coord, GameState, Unit, UnitType};
use crate::resolve::outcome::settled_outcome;
use validate::check_action;

/// Generates every legal action for the side to move.
///
/// Returns an empty vec once the game is decided.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let mut actions = Vec::new();
    legal_actions_into(state, &mut actions);
    actions
}

/// Like [`legal_actions`], reusing the caller's buffer.
pub fn legal_actions_into(state: &GameState, out: &mut Vec<Action>) {
    out.clear();
    if settled_outcome(state).is_some() {
        return;
    }
    generate_unchecked(state, out);
}

/// Generates actions without consulting the outcome. Callers must already
/// know the game is not settled.
pub(crate) fn generate_unchecked(state: &GameState, out: &mut Vec<Action>) {
    for (from, unit) in state.board.units_of(state.next_player) {
        unit_actions(state, from, unit, out);
    }
}

/// Returns true if the side to move has at least one action, ignoring
/// whether the game is otherwise decided.
pub(crate) fn has_any_action(state: &GameState) -> bool {
    state.board.units_of(state.next_player).any(|(from, unit)| {
        unit.unit_type != UnitType::Ai
            || from
                .adjacent()
                .into_iter()
                .any(|to| candidate(state, from, unit, to).is_some())
    })
}

/// Appends the legal actions of the unit at `from`.
fn unit_actions(state: &GameState, from: Coord, unit: Unit, out: &mut Vec<Action>) {
    for to in from.adjacent() {
        if let Some(action) = candidate(state, from, unit, to) {
            out.push(action);
        }
    }
    if unit.unit_type != UnitType::Ai {
        out.push(Action::SelfDestruct { at: from });
    }
}

/// The action aimed at `to`, if it is legal.
fn candidate(state: &GameState, from: Coord, unit: Unit, to: Coord) -> Option<Action> {
    if !state.board.in_bounds(to) {
        return None;
    }
    let action = match state.get(to) {
        None => Action::Move { from, to },
        Some(t) if t.player != unit.player => Action::Attack { from, target: to },
        Some(_) => Action::Repair { from, target: to },
    };
    check_action(state, &action).ok().map(|_| action)
}

/// Picks a uniformly random legal action, or `None` when there is none.
pub fn random_action(state: &GameState, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(state);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
