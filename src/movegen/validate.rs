//! Action validation.
//!
//! Checks a single action against the current board: ownership, bounds,
//! adjacency, movement direction, engagement, repair eligibility and the
//! self-destruct restriction on AIs.

use crate::board::{Action, Coord, GameState, Player, Unit, UnitType};
use crate::resolve::outcome::settled_outcome;

/// Reasons an action can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalActionError {
    #[error("the game is already over")]
    GameOver,

    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),

    #[error("no unit at {0}")]
    NoUnit(Coord),

    #[error("the unit at {0} belongs to the other player")]
    NotYourUnit(Coord),

    #[error("{from} and {to} are not orthogonally adjacent")]
    NotAdjacent { from: Coord, to: Coord },

    #[error("cell {0} is occupied")]
    Occupied(Coord),

    #[error("the unit at {0} is engaged in combat and cannot move")]
    Engaged(Coord),

    #[error("the unit at {from} cannot move back toward {to}")]
    WrongDirection { from: Coord, to: Coord },

    #[error("no enemy unit at {0}")]
    NotAnEnemy(Coord),

    #[error("no friendly unit at {0}")]
    NotFriendly(Coord),

    #[error("the unit at {from} cannot repair the unit at {target}")]
    NothingToRepair { from: Coord, target: Coord },

    #[error("the AI at {0} cannot self-destruct")]
    AiSelfDestruct(Coord),
}

/// Validates `action` for the side to move.
pub fn validate(state: &GameState, action: &Action) -> Result<(), IllegalActionError> {
    if settled_outcome(state).is_some() {
        return Err(IllegalActionError::GameOver);
    }
    check_action(state, action)
}

/// Validates `action` without checking whether the game is already decided.
/// Move generation calls this after checking the outcome once per position.
pub(crate) fn check_action(state: &GameState, action: &Action) -> Result<(), IllegalActionError> {
    let from = action.source();
    let unit = acting_unit(state, from)?;

    match *action {
        Action::Move { from, to } => check_move(state, from, unit, to),
        Action::Attack { from, target } => {
            check_adjacent(state, from, target)?;
            match state.get(target) {
                Some(t) if t.player != unit.player => Ok(()),
                _ => Err(IllegalActionError::NotAnEnemy(target)),
            }
        }
        Action::Repair { from, target } => {
            check_adjacent(state, from, target)?;
            match state.get(target) {
                Some(t) if t.player == unit.player => {
                    if unit.repair_to(&t) > 0 {
                        Ok(())
                    } else {
                        Err(IllegalActionError::NothingToRepair { from, target })
                    }
                }
                _ => Err(IllegalActionError::NotFriendly(target)),
            }
        }
        Action::SelfDestruct { at } => {
            if unit.unit_type == UnitType::Ai {
                Err(IllegalActionError::AiSelfDestruct(at))
            } else {
                Ok(())
            }
        }
    }
}

/// Turns a raw source/destination pair into the action it denotes.
///
/// The same cell twice means self-destruct; otherwise the destination's
/// occupant decides between move, attack and repair. The result is validated.
pub fn classify(state: &GameState, from: Coord, to: Coord) -> Result<Action, IllegalActionError> {
    if !state.board.in_bounds(to) {
        return Err(IllegalActionError::OutOfBounds(to));
    }
    let unit = acting_unit(state, from)?;
    let action = if from == to {
        Action::SelfDestruct { at: from }
    } else {
        match state.get(to) {
            None => Action::Move { from, to },
            Some(t) if t.player != unit.player => Action::Attack { from, target: to },
            Some(_) => Action::Repair { from, target: to },
        }
    };
    validate(state, &action)?;
    Ok(action)
}

/// Returns the unit at `from` if it belongs to the side to move.
fn acting_unit(state: &GameState, from: Coord) -> Result<Unit, IllegalActionError> {
    if !state.board.in_bounds(from) {
        return Err(IllegalActionError::OutOfBounds(from));
    }
    let unit = state.get(from).ok_or(IllegalActionError::NoUnit(from))?;
    if unit.player != state.next_player {
        return Err(IllegalActionError::NotYourUnit(from));
    }
    Ok(unit)
}

fn check_adjacent(state: &GameState, from: Coord, to: Coord) -> Result<(), IllegalActionError> {
    if !state.board.in_bounds(to) {
        return Err(IllegalActionError::OutOfBounds(to));
    }
    if !from.is_adjacent(to) {
        return Err(IllegalActionError::NotAdjacent { from, to });
    }
    Ok(())
}

fn check_move(state: &GameState, from: Coord, unit: Unit, to: Coord) -> Result<(), IllegalActionError> {
    check_adjacent(state, from, to)?;
    if !state.board.is_empty(to) {
        return Err(IllegalActionError::Occupied(to));
    }
    if unit.unit_type.is_restricted_mover() {
        if !is_forward(unit.player, from, to) {
            return Err(IllegalActionError::WrongDirection { from, to });
        }
        if state.board.is_engaged(from, unit.player) {
            return Err(IllegalActionError::Engaged(from));
        }
    }
    Ok(())
}

/// Attackers advance up or left, defenders down or right.
fn is_forward(player: Player, from: Coord, to: Coord) -> bool {
    match player {
        Player::Attacker => to.row < from.row || to.col < from.col,
        Player::Defender => to.row > from.row || to.col > from.col,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DEFAULT_MAX_TURNS;

    fn lone_pair(attacker: UnitType, defender: UnitType) -> GameState {
        let mut state = GameState::empty(5, DEFAULT_MAX_TURNS);
        state.place_unit(Coord::new(2, 2), Unit::new(Player::Attacker, attacker));
        state.place_unit(Coord::new(2, 1), Unit::new(Player::Defender, defender));
        state
    }

    #[test]
    fn restricted_unit_cannot_retreat() {
        let mut state = GameState::empty(5, DEFAULT_MAX_TURNS);
        state.place_unit(Coord::new(2, 2), Unit::new(Player::Attacker, UnitType::Program));
        state.place_unit(Coord::new(0, 0), Unit::new(Player::Defender, UnitType::Ai));
        let back = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(3, 2),
        };
        assert_eq!(
            validate(&state, &back),
            Err(IllegalActionError::WrongDirection {
                from: Coord::new(2, 2),
                to: Coord::new(3, 2)
            })
        );
        let forward = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(1, 2),
        };
        assert_eq!(validate(&state, &forward), Ok(()));
    }

    #[test]
    fn virus_moves_freely_even_when_engaged() {
        let state = lone_pair(UnitType::Virus, UnitType::Program);
        let back = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(3, 2),
        };
        assert_eq!(validate(&state, &back), Ok(()));
    }

    #[test]
    fn engaged_program_cannot_move() {
        let state = lone_pair(UnitType::Program, UnitType::Program);
        let mv = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(1, 2),
        };
        assert_eq!(
            validate(&state, &mv),
            Err(IllegalActionError::Engaged(Coord::new(2, 2)))
        );
    }

    #[test]
    fn diagonal_and_long_moves_rejected() {
        let state = lone_pair(UnitType::Virus, UnitType::Program);
        let diag = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(1, 1),
        };
        assert!(matches!(
            validate(&state, &diag),
            Err(IllegalActionError::NotAdjacent { .. })
        ));
        let far = Action::Move {
            from: Coord::new(2, 2),
            to: Coord::new(0, 2),
        };
        assert!(matches!(
            validate(&state, &far),
            Err(IllegalActionError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn cannot_act_with_enemy_or_missing_unit() {
        let state = lone_pair(UnitType::Virus, UnitType::Program);
        let enemy = Action::SelfDestruct { at: Coord::new(2, 1) };
        assert_eq!(
            validate(&state, &enemy),
            Err(IllegalActionError::NotYourUnit(Coord::new(2, 1)))
        );
        let empty = Action::SelfDestruct { at: Coord::new(0, 0) };
        assert_eq!(
            validate(&state, &empty),
            Err(IllegalActionError::NoUnit(Coord::new(0, 0)))
        );
        let oob = Action::SelfDestruct { at: Coord::new(7, 0) };
        assert_eq!(
            validate(&state, &oob),
            Err(IllegalActionError::OutOfBounds(Coord::new(7, 0)))
        );
    }

    #[test]
    fn ai_cannot_self_destruct() {
        let state = lone_pair(UnitType::Ai, UnitType::Program);
        let sd = Action::SelfDestruct { at: Coord::new(2, 2) };
        assert_eq!(
            validate(&state, &sd),
            Err(IllegalActionError::AiSelfDestruct(Coord::new(2, 2)))
        );
    }

    #[test]
    fn repair_requires_damage_and_ability() {
        let mut state = GameState::empty(5, DEFAULT_MAX_TURNS);
        state.next_player = Player::Defender;
        state.place_unit(Coord::new(0, 1), Unit::new(Player::Defender, UnitType::Tech));
        state.place_unit(
            Coord::new(0, 0),
            Unit::with_health(Player::Defender, UnitType::Ai, 5),
        );
        state.place_unit(Coord::new(1, 1), Unit::new(Player::Defender, UnitType::Program));
        state.place_unit(Coord::new(4, 4), Unit::new(Player::Attacker, UnitType::Ai));

        assert_eq!(
            classify(&state, Coord::new(0, 1), Coord::new(0, 0)),
            Ok(Action::Repair {
                from: Coord::new(0, 1),
                target: Coord::new(0, 0)
            })
        );
        assert_eq!(
            classify(&state, Coord::new(0, 1), Coord::new(1, 1)),
            Err(IllegalActionError::NothingToRepair {
                from: Coord::new(0, 1),
                target: Coord::new(1, 1)
            })
        );
        // A Program has no repair ability at all.
        assert!(classify(&state, Coord::new(1, 1), Coord::new(0, 1)).is_err());
    }

    #[test]
    fn classify_picks_kind_from_destination() {
        let state = lone_pair(UnitType::Virus, UnitType::Program);
        assert_eq!(
            classify(&state, Coord::new(2, 2), Coord::new(2, 1)),
            Ok(Action::Attack {
                from: Coord::new(2, 2),
                target: Coord::new(2, 1)
            })
        );
        assert_eq!(
            classify(&state, Coord::new(2, 2), Coord::new(2, 2)),
            Ok(Action::SelfDestruct { at: Coord::new(2, 2) })
        );
        assert_eq!(
            classify(&state, Coord::new(2, 2), Coord::new(1, 2)),
            Ok(Action::Move {
                from: Coord::new(2, 2),
                to: Coord::new(1, 2)
            })
        );
    }

    #[test]
    fn nothing_is_legal_after_turn_limit() {
        let mut state = lone_pair(UnitType::Virus, UnitType::Program);
        state.turns_played = state.max_turns;
        let sd = Action::SelfDestruct { at: Coord::new(2, 2) };
        assert_eq!(validate(&state, &sd), Err(IllegalActionError::GameOver));
    }
}
