//! Game state representation.
//!
//! A `GameState` is the board plus everything needed to decide whose turn it
//! is and whether the game is over: the side to move, the turn counter and
//! limit, and which AIs have been destroyed.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::grid::Board;
use super::unit::{Player, Unit, UnitType};

/// Default number of turns (plies) before the game is cut off.
pub const DEFAULT_MAX_TURNS: u32 = 100;

/// Smallest board the standard layout fits on without overlapping.
pub const STANDARD_MIN_DIM: u8 = 4;

/// What happens when the turn limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundLimit {
    /// Nobody wins.
    #[default]
    Draw,
    /// The defender is awarded the win for holding out.
    DefenderWins,
}

/// Complete game state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub next_player: Player,
    pub turns_played: u32,
    pub max_turns: u32,
    pub round_limit: RoundLimit,
    /// Set once a player's AI has been destroyed during play. A setup that
    /// never had an AI does not count as having lost it.
    pub(crate) ai_destroyed: [bool; 2],
}

impl GameState {
    /// Creates a state with an empty board, attacker to move.
    pub fn empty(dim: u8, max_turns: u32) -> Self {
        GameState {
            board: Board::empty(dim),
            next_player: Player::Attacker,
            turns_played: 0,
            max_turns,
            round_limit: RoundLimit::Draw,
            ai_destroyed: [false; 2],
        }
    }

    /// Creates the standard opening layout: defender in the top-left corner,
    /// attacker mirrored in the bottom-right.
    ///
    /// # Panics
    /// Panics if `dim` is below `STANDARD_MIN_DIM`.
    pub fn standard(dim: u8, max_turns: u32) -> Self {
        assert!(
            dim >= STANDARD_MIN_DIM,
            "standard layout needs a board of at least {}",
            STANDARD_MIN_DIM
        );
        let mut state = GameState::empty(dim, max_turns);
        let md = dim as i8 - 1;
        let layout = [
            (0, 0, Player::Defender, UnitType::Ai),
            (1, 0, Player::Defender, UnitType::Tech),
            (0, 1, Player::Defender, UnitType::Tech),
            (2, 0, Player::Defender, UnitType::Firewall),
            (0, 2, Player::Defender, UnitType::Firewall),
            (1, 1, Player::Defender, UnitType::Program),
            (md, md, Player::Attacker, UnitType::Ai),
            (md - 1, md, Player::Attacker, UnitType::Virus),
            (md, md - 1, Player::Attacker, UnitType::Virus),
            (md - 2, md, Player::Attacker, UnitType::Program),
            (md, md - 2, Player::Attacker, UnitType::Program),
            (md - 1, md - 1, Player::Attacker, UnitType::Firewall),
        ];
        for (row, col, player, unit_type) in layout {
            let placed = state
                .board
                .place_unit(Coord::new(row, col), Unit::new(player, unit_type));
            assert!(placed, "standard layout overlaps at {}", Coord::new(row, col));
        }
        state
    }

    pub fn with_round_limit(mut self, round_limit: RoundLimit) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn dim(&self) -> u8 {
        self.board.dim()
    }

    /// Places a unit on the board. Returns false if the cell is unusable.
    pub fn place_unit(&mut self, c: Coord, unit: Unit) -> bool {
        self.board.place_unit(c, unit)
    }

    pub fn get(&self, c: Coord) -> Option<Unit> {
        self.board.get(c)
    }

    /// Returns true if `player`'s AI was destroyed during play.
    pub fn has_lost_ai(&self, player: Player) -> bool {
        self.ai_destroyed[player.index()]
    }

    /// Returns true once the turn counter has reached the limit.
    pub fn turn_limit_reached(&self) -> bool {
        self.turns_played >= self.max_turns
    }

    /// Passes the turn to the other player.
    pub(crate) fn next_turn(&mut self) {
        self.next_player = self.next_player.other();
        self.turns_played += 1;
    }
}
