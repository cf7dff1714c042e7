//! Grid coordinates.
//!
//! Rows are labelled with letters and columns with hex digits, so `D2` is
//! row 3, column 2.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row labels, indexed by row.
pub const ROW_LABELS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Column labels, indexed by column.
pub const COL_LABELS: &[u8; 16] = b"0123456789abcdef";

/// A cell position on the board. Signed so neighbours of edge cells can be
/// represented and rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }

    /// The four orthogonal neighbours in generation order: up, left, down, right.
    pub const fn adjacent(self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col + 1),
        ]
    }

    /// The eight cells around this one (diagonals included), row-major.
    pub fn surrounding(self) -> impl Iterator<Item = Coord> {
        (-1i8..=1)
            .flat_map(move |dr| (-1i8..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(move |(dr, dc)| Coord::new(self.row + dr, self.col + dc))
    }

    /// Returns true if `other` is one orthogonal step away.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dr = (self.row as i16 - other.row as i16).abs();
        let dc = (self.col as i16 - other.col as i16).abs();
        dr + dc == 1
    }

    pub fn row_label(self) -> char {
        usize::try_from(self.row)
            .ok()
            .and_then(|r| ROW_LABELS.get(r))
            .map_or('?', |&b| b as char)
    }

    pub fn col_label(self) -> char {
        usize::try_from(self.col)
            .ok()
            .and_then(|c| COL_LABELS.get(c))
            .map_or('?', |&b| b as char)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_order_is_up_left_down_right() {
        let c = Coord::new(2, 2);
        assert_eq!(
            c.adjacent(),
            [
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 2),
                Coord::new(2, 3)
            ]
        );
    }

    #[test]
    fn surrounding_has_eight_cells_without_center() {
        let c = Coord::new(1, 1);
        let cells: Vec<Coord> = c.surrounding().collect();
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&c));
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[7], Coord::new(2, 2));
    }

    #[test]
    fn adjacency_excludes_diagonals() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn display_uses_letter_and_digit() {
        assert_eq!(Coord::new(3, 2).to_string(), "D2");
        assert_eq!(Coord::new(0, 11).to_string(), "Ab");
        assert_eq!(Coord::new(-1, 0).to_string(), "?0");
    }
}
