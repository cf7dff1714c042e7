//! Text formats.
//!
//! Human-facing notation for cells and actions, the board printout, and the
//! compact position string used by fixtures and transcripts.

pub mod notation;
pub mod position;

pub use notation::{format_action, parse_action_pair, parse_coord, render_board, NotationError};
pub use position::{encode_position, parse_position, PositionError};
