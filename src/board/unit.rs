//! Players, unit types and combat tables.
//!
//! Damage and repair amounts are looked up in fixed tables indexed by the
//! acting unit's type (row) and the target's type (column).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum (and starting) health of every unit.
pub const MAX_HEALTH: u8 = 9;

/// Damage a self-destructing unit deals to each surrounding unit.
pub const SELF_DESTRUCT_DAMAGE: u8 = 2;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Attacker,
    Defender,
}

pub const ALL_PLAYERS: [Player; 2] = [Player::Attacker, Player::Defender];

impl Player {
    /// The opposing player.
    pub const fn other(self) -> Player {
        match self {
            Player::Attacker => Player::Defender,
            Player::Defender => Player::Attacker,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase prefix used when rendering units (`a` / `d`).
    pub const fn short_char(self) -> char {
        match self {
            Player::Attacker => 'a',
            Player::Defender => 'd',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Attacker => "Attacker",
            Player::Defender => "Defender",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The closed set of unit archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Ai,
    Tech,
    Virus,
    Program,
    Firewall,
}

pub const ALL_UNIT_TYPES: [UnitType; 5] = [
    UnitType::Ai,
    UnitType::Tech,
    UnitType::Virus,
    UnitType::Program,
    UnitType::Firewall,
];

/// `DAMAGE_TABLE[source][target]`, in `ALL_UNIT_TYPES` order.
const DAMAGE_TABLE: [[u8; 5]; 5] = [
    [3, 3, 3, 3, 1], // AI
    [1, 1, 6, 1, 1], // Tech
    [9, 6, 1, 6, 1], // Virus
    [3, 3, 3, 3, 1], // Program
    [1, 1, 1, 1, 1], // Firewall
];

/// `REPAIR_TABLE[source][target]`, in `ALL_UNIT_TYPES` order.
const REPAIR_TABLE: [[u8; 5]; 5] = [
    [0, 1, 1, 0, 0], // AI
    [3, 0, 0, 3, 3], // Tech
    [0, 0, 0, 0, 0], // Virus
    [0, 0, 0, 0, 0], // Program
    [0, 0, 0, 0, 0], // Firewall
];

impl UnitType {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Uppercase letter used when rendering units.
    pub const fn short_char(self) -> char {
        match self {
            UnitType::Ai => 'A',
            UnitType::Tech => 'T',
            UnitType::Virus => 'V',
            UnitType::Program => 'P',
            UnitType::Firewall => 'F',
        }
    }

    pub fn from_short_char(c: char) -> Option<UnitType> {
        match c {
            'A' => Some(UnitType::Ai),
            'T' => Some(UnitType::Tech),
            'V' => Some(UnitType::Virus),
            'P' => Some(UnitType::Program),
            'F' => Some(UnitType::Firewall),
            _ => None,
        }
    }

    /// Whether this type may only move toward the enemy and never while engaged.
    pub const fn is_restricted_mover(self) -> bool {
        matches!(self, UnitType::Ai | UnitType::Firewall | UnitType::Program)
    }
}

/// A unit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub player: Player,
    pub unit_type: UnitType,
    pub health: u8,
}

impl Unit {
    /// Creates a unit at full health.
    pub const fn new(player: Player, unit_type: UnitType) -> Self {
        Unit {
            player,
            unit_type,
            health: MAX_HEALTH,
        }
    }

    /// Creates a unit with the given health, clamped to `MAX_HEALTH`.
    pub fn with_health(player: Player, unit_type: UnitType, health: u8) -> Self {
        Unit {
            player,
            unit_type,
            health: health.min(MAX_HEALTH),
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage this unit deals to `target`, never more than the target has left.
    pub fn damage_to(&self, target: &Unit) -> u8 {
        DAMAGE_TABLE[self.unit_type.index()][target.unit_type.index()].min(target.health)
    }

    /// Health this unit restores to `target`, never past `MAX_HEALTH`.
    pub fn repair_to(&self, target: &Unit) -> u8 {
        REPAIR_TABLE[self.unit_type.index()][target.unit_type.index()]
            .min(MAX_HEALTH.saturating_sub(target.health))
    }

    /// Applies damage, saturating at zero.
    pub fn take_damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Applies healing, saturating at `MAX_HEALTH`.
    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.player.short_char(),
            self.unit_type.short_char(),
            self.health
        )
    }
}
