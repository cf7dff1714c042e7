//! Action types.
//!
//! Every action is written as a source/destination coordinate pair in game
//! notation; the kind is decided by what occupies the destination.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// The four kinds of action a unit can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Move,
    Attack,
    Repair,
    SelfDestruct,
}

/// A single ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    /// Step into an adjacent empty cell: `D2 C2`
    Move { from: Coord, to: Coord },

    /// Trade blows with an adjacent enemy: `D2 D1`
    Attack { from: Coord, target: Coord },

    /// Heal an adjacent friendly unit: `A1 A0`
    Repair { from: Coord, target: Coord },

    /// Remove the unit, damaging all eight surrounding cells: `D2 D2`
    SelfDestruct { at: Coord },
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Move { .. } => ActionKind::Move,
            Action::Attack { .. } => ActionKind::Attack,
            Action::Repair { .. } => ActionKind::Repair,
            Action::SelfDestruct { .. } => ActionKind::SelfDestruct,
        }
    }

    /// The cell of the acting unit.
    pub const fn source(&self) -> Coord {
        match *self {
            Action::Move { from, .. } | Action::Attack { from, .. } | Action::Repair { from, .. } => {
                from
            }
            Action::SelfDestruct { at } => at,
        }
    }

    /// The cell the action is aimed at (the source itself for self-destruct).
    pub const fn destination(&self) -> Coord {
        match *self {
            Action::Move { to, .. } => to,
            Action::Attack { target, .. } | Action::Repair { target, .. } => target,
            Action::SelfDestruct { at } => at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_and_destination() {
        let a = Action::Attack {
            from: Coord::new(1, 1),
            target: Coord::new(1, 2),
        };
        assert_eq!(a.kind(), ActionKind::Attack);
        assert_eq!(a.source(), Coord::new(1, 1));
        assert_eq!(a.destination(), Coord::new(1, 2));

        let sd = Action::SelfDestruct { at: Coord::new(2, 3) };
        assert_eq!(sd.source(), sd.destination());
        assert_eq!(sd.kind(), ActionKind::SelfDestruct);
    }

    #[test]
    fn action_variants_are_distinct() {
        let from = Coord::new(0, 0);
        let to = Coord::new(0, 1);
        assert_ne!(Action::Move { from, to }, Action::Attack { from, target: to });
        assert_ne!(Action::Attack { from, target: to }, Action::Repair { from, target: to });
    }

    #[test]
    fn action_serializes_with_kind_tag() {
        let a = Action::Move {
            from: Coord::new(4, 4),
            to: Coord::new(3, 4),
        };
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"kind\":\"move\""), "got {}", json);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
