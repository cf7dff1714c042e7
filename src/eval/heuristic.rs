//! Heuristic position evaluation.
//!
//! Three handcrafted evaluators, all antisymmetric between the players:
//!
//! - e0: weighted unit counts (AI 999, everything else 3).
//! - e1: health-aware material, each unit worth `health * weight + 4` where
//!   the AI's health weighs 11 and every other unit's weighs 1.
//! - e2: e1 scaled by `resolution(dim)` plus a bounded spatial term, so the
//!   spatial term only breaks ties between positions with equal e1.
//!
//! Every function walks the grid once; no allocation.

use crate::board::{Board, Coord, Player, Unit, UnitType};

use super::Score;

/// Minimum e1 difference that e2 is guaranteed never to reverse.
pub const E2_INFLUENCE_THRESHOLD: Score = 1;

/// Count weight of a unit type in e0.
const fn material_weight(t: UnitType) -> Score {
    match t {
        UnitType::Ai => 999,
        _ => 3,
    }
}

/// Per-point health weight of a unit type in e1.
const fn health_weight(t: UnitType) -> Score {
    match t {
        UnitType::Ai => 11,
        _ => 1,
    }
}

/// Flat bonus each living unit is worth in e1.
const UNIT_BONUS: Score = 4;

/// Signed contribution of a unit: positive for `perspective`, negative otherwise.
#[inline]
fn signed(unit: &Unit, perspective: Player, value: Score) -> Score {
    if unit.player == perspective {
        value
    } else {
        -value
    }
}

/// e0: material count.
pub fn e0(board: &Board, perspective: Player) -> Score {
    board
        .units()
        .map(|(_, u)| signed(&u, perspective, material_weight(u.unit_type)))
        .sum()
}

/// e1: material weighted by health.
pub fn e1(board: &Board, perspective: Player) -> Score {
    board
        .units()
        .map(|(_, u)| {
            let value = u.health as Score * health_weight(u.unit_type) + UNIT_BONUS;
            signed(&u, perspective, value)
        })
        .sum()
}

/// Largest absolute value the spatial term can take on a `dim` board.
pub const fn spatial_bound(dim: u8) -> Score {
    4 * dim as Score * dim as Score
}

/// Factor e1 is scaled by inside e2. Larger than the full span of the
/// spatial term, so the spatial term cannot overturn a one-point e1 gap.
pub const fn resolution(dim: u8) -> Score {
    2 * spatial_bound(dim) + 1
}

/// Cohesion of one unit: +1 per friendly orthogonal neighbour, -1 if it has none.
fn cohesion(board: &Board, at: Coord, unit: &Unit) -> Score {
    let friends = at
        .adjacent()
        .iter()
        .filter(|&&n| matches!(board.get(n), Some(f) if f.player == unit.player))
        .count() as Score;
    if friends == 0 {
        -1
    } else {
        friends
    }
}

/// The spatial term: own cohesion minus opponent cohesion.
pub fn spatial(board: &Board, perspective: Player) -> Score {
    board
        .units()
        .map(|(c, u)| signed(&u, perspective, cohesion(board, c, &u)))
        .sum()
}

/// e2: e1 with a spatial tie-breaker.
pub fn e2(board: &Board, perspective: Player) -> Score {
    e1(board, perspective) * resolution(board.dim()) + spatial(board, perspective)
}
