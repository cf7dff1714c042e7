//! Coordinate and action notation.
//!
//! A cell is written as a row letter followed by a column digit (`D2`); an
//! action as its source and destination cells separated by whitespace
//! (`D2 C2`). The destination's occupant decides the action kind, and the
//! same cell twice means self-destruct. Row letters are case-insensitive.

use std::fmt;
use std::fmt::Write as _;

use thiserror::Error;

use crate::board::coord::{COL_LABELS, ROW_LABELS};
use crate::board::{Action, Coord, GameState};

/// Errors that can occur when parsing coordinates or actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid coordinate '{0}'")]
    InvalidCoord(String),

    #[error("expected two coordinates, got {0}")]
    WrongTokenCount(usize),
}

/// Parses a cell such as `D2`. Columns past 9 are hex digits (`Ca`).
pub fn parse_coord(s: &str) -> Result<Coord, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidCoord(s.to_string()));
    }
    let row = ROW_LABELS
        .iter()
        .position(|&b| b == bytes[0].to_ascii_uppercase());
    let col = COL_LABELS
        .iter()
        .position(|&b| b == bytes[1].to_ascii_lowercase());
    match (row, col) {
        (Some(r), Some(c)) => Ok(Coord::new(r as i8, c as i8)),
        _ => Err(NotationError::InvalidCoord(s.to_string())),
    }
}

/// Parses `"<from> <to>"` into its two cells.
pub fn parse_action_pair(s: &str) -> Result<(Coord, Coord), NotationError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(NotationError::EmptyInput),
        [from, to] => Ok((parse_coord(from)?, parse_coord(to)?)),
        _ => Err(NotationError::WrongTokenCount(tokens.len())),
    }
}

/// Formats an action as `"<from> <to>"`.
pub fn format_action(action: &Action) -> String {
    format!("{} {}", action.source(), action.destination())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source(), self.destination())
    }
}

/// Renders the board as text: a header row of column labels, then one line
/// per row with each unit as `<player><type><health>` and empty cells as `.`.
pub fn render_board(state: &GameState) -> String {
    let dim = state.dim() as i8;
    let mut s = String::from("  ");
    for col in 0..dim {
        let _ = write!(s, " {:>3}", Coord::new(0, col).col_label());
    }
    s.push('\n');
    for row in 0..dim {
        let _ = write!(s, "{}:", Coord::new(row, 0).row_label());
        for col in 0..dim {
            match state.get(Coord::new(row, col)) {
                Some(unit) => {
                    let _ = write!(s, " {:>3}", unit.to_string());
                }
                None => s.push_str("   ."),
            }
        }
        s.push('\n');
    }
    s
}
