//! Action resolution.
//!
//! Applies validated actions to the game state (with undo support) and
//! decides when the game is over.

pub mod apply;
pub mod outcome;

pub use apply::{apply_action, undo_action, Undo};
pub use outcome::{is_terminal, outcome, settled_outcome, winner, Outcome};
