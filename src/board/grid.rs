//! The square unit grid.
//!
//! Cells are stored row-major in a flat vector sized once at construction;
//! the dimension never changes afterwards.

use super::coord::Coord;
use super::unit::{Player, Unit, MAX_HEALTH};

/// Smallest supported board dimension.
pub const MIN_DIM: u8 = 3;
/// Largest supported board dimension (limited by column labels).
pub const MAX_DIM: u8 = 16;
/// Dimension of the standard game.
pub const DEFAULT_DIM: u8 = 5;

/// A fixed-size square grid holding at most one unit per cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dim: u8,
    cells: Vec<Option<Unit>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    /// Panics if `dim` is outside `MIN_DIM..=MAX_DIM`; configuration
    /// validation rejects such values before a board is ever built.
    pub fn empty(dim: u8) -> Self {
        assert!(
            (MIN_DIM..=MAX_DIM).contains(&dim),
            "board dimension {} out of range",
            dim
        );
        Board {
            dim,
            cells: vec![None; dim as usize * dim as usize],
        }
    }

    pub fn dim(&self) -> u8 {
        self.dim
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && (c.row as u8) < self.dim && (c.col as u8) < self.dim
    }

    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if self.in_bounds(c) {
            Some(c.row as usize * self.dim as usize + c.col as usize)
        } else {
            None
        }
    }

    /// Returns the unit at `c`, or `None` for empty or out-of-bounds cells.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Unit> {
        self.index(c).and_then(|i| self.cells[i])
    }

    pub fn is_empty(&self, c: Coord) -> bool {
        self.get(c).is_none()
    }

    /// Places a unit, clamping its health to `MAX_HEALTH`. Returns false if
    /// the cell is occupied, out of bounds, or the unit is already destroyed.
    pub fn place_unit(&mut self, c: Coord, unit: Unit) -> bool {
        if !unit.is_alive() {
            return false;
        }
        match self.index(c) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(Unit {
                    health: unit.health.min(MAX_HEALTH),
                    ..unit
                });
                true
            }
            _ => false,
        }
    }

    /// Overwrites a cell. Callers guarantee `c` is in bounds.
    pub(crate) fn set(&mut self, c: Coord, unit: Option<Unit>) {
        let i = self
            .index(c)
            .unwrap_or_else(|| panic!("write outside the board at {}", c));
        self.cells[i] = unit;
    }

    /// Removes and returns the unit at `c`.
    pub fn remove(&mut self, c: Coord) -> Option<Unit> {
        let i = self.index(c)?;
        self.cells[i].take()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let dim = self.dim as i8;
        (0..dim).flat_map(move |row| (0..dim).map(move |col| Coord::new(row, col)))
    }

    /// All units with their positions, row-major.
    pub fn units(&self) -> impl Iterator<Item = (Coord, Unit)> + '_ {
        self.coords().filter_map(move |c| self.get(c).map(|u| (c, u)))
    }

    /// Units belonging to `player`, row-major.
    pub fn units_of(&self, player: Player) -> impl Iterator<Item = (Coord, Unit)> + '_ {
        self.units().filter(move |(_, u)| u.player == player)
    }

    pub fn count_units(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|u| matches!(u, Some(u) if u.player == player))
            .count()
    }

    /// Returns true if a unit of `player` at `c` has an enemy orthogonally adjacent.
    pub fn is_engaged(&self, c: Coord, player: Player) -> bool {
        c.adjacent()
            .iter()
            .any(|&n| matches!(self.get(n), Some(u) if u.player != player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::unit::UnitType;

    #[test]
    fn empty_board_has_no_units() {
        let board = Board::empty(5);
        assert_eq!(board.area(), 25);
        assert_eq!(board.units().count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn rejects_tiny_board() {
        Board::empty(2);
    }

    #[test]
    fn place_unit_rejects_duplicate_and_out_of_bounds() {
        let mut board = Board::empty(5);
        let u = Unit::new(Player::Attacker, UnitType::Virus);
        assert!(board.place_unit(Coord::new(1, 1), u));
        assert!(!board.place_unit(Coord::new(1, 1), u));
        assert!(!board.place_unit(Coord::new(5, 0), u));
        assert!(!board.place_unit(Coord::new(-1, 0), u));
        assert_eq!(board.count_units(Player::Attacker), 1);
    }

    #[test]
    fn place_unit_rejects_dead_unit() {
        let mut board = Board::empty(5);
        let dead = Unit::with_health(Player::Defender, UnitType::Tech, 0);
        assert!(!board.place_unit(Coord::new(0, 0), dead));
    }

    #[test]
    fn place_unit_clamps_health() {
        let mut board = Board::empty(5);
        let overfull = Unit {
            player: Player::Attacker,
            unit_type: UnitType::Virus,
            health: 200,
        };
        assert!(board.place_unit(Coord::new(1, 1), overfull));
        assert_eq!(board.get(Coord::new(1, 1)).map(|u| u.health), Some(MAX_HEALTH));
    }

    #[test]
    fn units_iterate_row_major() {
        let mut board = Board::empty(5);
        board.place_unit(Coord::new(3, 0), Unit::new(Player::Attacker, UnitType::Ai));
        board.place_unit(Coord::new(0, 4), Unit::new(Player::Defender, UnitType::Ai));
        board.place_unit(Coord::new(0, 1), Unit::new(Player::Defender, UnitType::Tech));
        let coords: Vec<Coord> = board.units().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![Coord::new(0, 1), Coord::new(0, 4), Coord::new(3, 0)]);
        assert_eq!(board.units_of(Player::Defender).count(), 2);
    }

    #[test]
    fn engagement_is_orthogonal_only() {
        let mut board = Board::empty(5);
        board.place_unit(Coord::new(2, 2), Unit::new(Player::Attacker, UnitType::Program));
        board.place_unit(Coord::new(1, 1), Unit::new(Player::Defender, UnitType::Program));
        assert!(!board.is_engaged(Coord::new(2, 2), Player::Attacker));
        board.place_unit(Coord::new(2, 1), Unit::new(Player::Defender, UnitType::Firewall));
        assert!(board.is_engaged(Coord::new(2, 2), Player::Attacker));
    }

    #[test]
    fn remove_takes_unit() {
        let mut board = Board::empty(4);
        let u = Unit::new(Player::Defender, UnitType::Firewall);
        board.place_unit(Coord::new(0, 0), u);
        assert_eq!(board.remove(Coord::new(0, 0)), Some(u));
        assert!(board.is_empty(Coord::new(0, 0)));
        assert_eq!(board.remove(Coord::new(9, 9)), None);
    }
}
