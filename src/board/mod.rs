//! Board representation and game-state types.
//!
//! Contains coordinates, units and their combat tables, the grid, actions,
//! and the overall game state.

pub mod action;
pub mod coord;
pub mod grid;
pub mod state;
pub mod unit;

pub use action::{Action, ActionKind};
pub use coord::Coord;
pub use grid::{Board, DEFAULT_DIM, MAX_DIM, MIN_DIM};
pub use state::{GameState, RoundLimit, DEFAULT_MAX_TURNS, STANDARD_MIN_DIM};
pub use unit::{
    Player, Unit, UnitType, ALL_PLAYERS, ALL_UNIT_TYPES, MAX_HEALTH, SELF_DESTRUCT_DAMAGE,
};
