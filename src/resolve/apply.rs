//! Applying and undoing actions.
//!
//! `apply_action` validates and mutates the state in place, returning an
//! `Undo` record that `undo_action` uses to restore the exact prior state.
//! An action touches at most nine cells (a self-destruct and its eight
//! neighbours), so an undo record is a small fixed-size value and a search
//! holds only one per ply.

use crate::board::{Action, Coord, GameState, Player, Unit, UnitType, SELF_DESTRUCT_DAMAGE};
use crate::movegen::{validate, IllegalActionError};

/// Maximum number of cells a single action can modify.
const MAX_TOUCHED: usize = 9;

/// Everything needed to revert one applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    cells: [(Coord, Option<Unit>); MAX_TOUCHED],
    len: u8,
    ai_destroyed: [bool; 2],
    next_player: Player,
    turns_played: u32,
}

impl Undo {
    fn new(state: &GameState) -> Self {
        Undo {
            cells: [(Coord::new(0, 0), None); MAX_TOUCHED],
            len: 0,
            ai_destroyed: state.ai_destroyed,
            next_player: state.next_player,
            turns_played: state.turns_played,
        }
    }

    /// Saves the current content of `c` before it is modified.
    fn record(&mut self, state: &GameState, c: Coord) {
        let i = self.len as usize;
        assert!(i < MAX_TOUCHED, "action touched more than {} cells", MAX_TOUCHED);
        self.cells[i] = (c, state.board.get(c));
        self.len += 1;
    }

    /// Number of cells this record restores.
    pub fn touched(&self) -> usize {
        self.len as usize
    }
}

/// Validates and applies `action`, then passes the turn.
///
/// On error the state is left untouched.
pub fn apply_action(state: &mut GameState, action: &Action) -> Result<Undo, IllegalActionError> {
    validate(state, action)?;
    Ok(apply_unchecked(state, action))
}

/// Applies an action already known to be legal.
pub(crate) fn apply_unchecked(state: &mut GameState, action: &Action) -> Undo {
    debug_assert_eq!(validate(state, action), Ok(()), "illegal action {:?}", action);
    let mut undo = Undo::new(state);

    match *action {
        Action::Move { from, to } => {
            undo.record(state, from);
            undo.record(state, to);
            let unit = occupant(state, from);
            state.board.set(from, None);
            state.board.set(to, Some(unit));
        }
        Action::Attack { from, target } => {
            undo.record(state, from);
            undo.record(state, target);
            let attacker = occupant(state, from);
            let defender = occupant(state, target);
            let dealt = attacker.damage_to(&defender);
            let returned = defender.damage_to(&attacker);
            damage(state, target, dealt);
            damage(state, from, returned);
        }
        Action::Repair { from, target } => {
            undo.record(state, target);
            let healer = occupant(state, from);
            let mut patient = occupant(state, target);
            patient.heal(healer.repair_to(&patient));
            state.board.set(target, Some(patient));
        }
        Action::SelfDestruct { at } => {
            undo.record(state, at);
            for c in at.surrounding() {
                if state.board.get(c).is_some() {
                    undo.record(state, c);
                    damage(state, c, SELF_DESTRUCT_DAMAGE);
                }
            }
            state.board.set(at, None);
        }
    }

    state.next_turn();
    undo
}

/// Reverts the action that produced `undo`. Undo records must be applied in
/// reverse order of the actions that created them.
pub fn undo_action(state: &mut GameState, undo: &Undo) {
    for &(c, unit) in undo.cells[..undo.len as usize].iter().rev() {
        state.board.set(c, unit);
    }
    state.ai_destroyed = undo.ai_destroyed;
    state.next_player = undo.next_player;
    state.turns_played = undo.turns_played;
}

impl GameState {
    /// Returns the state after `action`, leaving `self` unchanged.
    pub fn play(&self, action: &Action) -> Result<GameState, IllegalActionError> {
        let mut next = self.clone();
        apply_action(&mut next, action)?;
        Ok(next)
    }
}

fn occupant(state: &GameState, c: Coord) -> Unit {
    match state.board.get(c) {
        Some(u) => u,
        None => panic!("validated action refers to empty cell {}", c),
    }
}

/// Damages the unit at `c`, removing it (and recording a lost AI) if destroyed.
fn damage(state: &mut GameState, c: Coord, amount: u8) {
    let mut unit = occupant(state, c);
    unit.take_damage(amount);
    if unit.is_alive() {
        state.board.set(c, Some(unit));
    } else {
        state.board.set(c, None);
        if unit.unit_type == UnitType::Ai {
            state.ai_destroyed[unit.player.index()] = true;
        }
    }
}
