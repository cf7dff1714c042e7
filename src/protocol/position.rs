//! Position strings.
//!
//! A compact single-line encoding of a full game state, used for test
//! fixtures, transcripts and starting a game from an arbitrary position.
//!
//! Format: `<header>/<units>/<lost_ais>`
//!
//! - header: `<dim><side>:<turns_played>:<max_turns>`, side is `a` or `d`
//! - units: comma-separated `<player><type><health><cell>` (e.g. `dA9A0`),
//!   row-major, or `-` for an empty board
//! - lost_ais: players whose AI was destroyed (`a`, `d`, `ad`) or `-`
//!
//! The standard 5x5 opening is
//! `5a:0:100/dA9A0,dT9A1,dF9A2,dT9B0,dP9B1,dF9C0,aP9C4,aF9D3,aV9D4,aP9E2,aV9E3,aA9E4/-`.

use thiserror::Error;

use crate::board::{GameState, Player, Unit, UnitType, MAX_DIM, MAX_HEALTH, MIN_DIM};

use super::notation::{parse_coord, NotationError};

/// Errors that can occur when parsing a position string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("expected 3 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid header: '{0}'")]
    InvalidHeader(String),

    #[error("board dimension {0} out of range")]
    DimensionOutOfRange(u8),

    #[error("invalid player character: '{0}'")]
    InvalidPlayer(char),

    #[error("invalid unit type character: '{0}'")]
    InvalidUnitType(char),

    #[error("invalid unit entry: '{0}'")]
    InvalidUnitEntry(String),

    #[error("cell {0} is outside the board")]
    OutOfBounds(String),

    #[error("duplicate unit at '{0}'")]
    DuplicateUnit(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

fn parse_player(c: char) -> Result<Player, PositionError> {
    match c {
        'a' => Ok(Player::Attacker),
        'd' => Ok(Player::Defender),
        _ => Err(PositionError::InvalidPlayer(c)),
    }
}

/// Parses the header section into (dim, side to move, turns, max turns).
fn parse_header(s: &str) -> Result<(u8, Player, u32, u32), PositionError> {
    let invalid = || PositionError::InvalidHeader(s.to_string());
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let mut chars = parts[0].chars();
    let side = chars.next_back().ok_or_else(invalid)?;
    let dim: u8 = chars.as_str().parse().map_err(|_| invalid())?;
    if !(MIN_DIM..=MAX_DIM).contains(&dim) {
        return Err(PositionError::DimensionOutOfRange(dim));
    }
    let side = parse_player(side)?;
    let turns: u32 = parts[1].parse().map_err(|_| invalid())?;
    let max_turns: u32 = parts[2].parse().map_err(|_| invalid())?;
    Ok((dim, side, turns, max_turns))
}

/// Parses the units section into `state`.
fn parse_units(s: &str, state: &mut GameState) -> Result<(), PositionError> {
    if s == "-" {
        return Ok(());
    }

    for entry in s.split(',') {
        let chars: Vec<char> = entry.chars().collect();
        if chars.len() != 5 {
            return Err(PositionError::InvalidUnitEntry(entry.to_string()));
        }

        let player = parse_player(chars[0])?;
        let unit_type =
            UnitType::from_short_char(chars[1]).ok_or(PositionError::InvalidUnitType(chars[1]))?;
        let health = chars[2]
            .to_digit(10)
            .filter(|&h| (1..=MAX_HEALTH as u32).contains(&h))
            .ok_or_else(|| PositionError::InvalidUnitEntry(entry.to_string()))?;
        let cell: String = chars[3..].iter().collect();
        let c = parse_coord(&cell)?;

        if !state.board.in_bounds(c) {
            return Err(PositionError::OutOfBounds(cell));
        }
        if !state.place_unit(c, Unit::with_health(player, unit_type, health as u8)) {
            return Err(PositionError::DuplicateUnit(cell));
        }
    }

    Ok(())
}

fn parse_lost_ais(s: &str, state: &mut GameState) -> Result<(), PositionError> {
    if s == "-" {
        return Ok(());
    }
    for c in s.chars() {
        let player = parse_player(c)?;
        state.ai_destroyed[player.index()] = true;
    }
    Ok(())
}

/// Parses a position string into a `GameState` with the default round limit.
pub fn parse_position(s: &str) -> Result<GameState, PositionError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 3 {
        return Err(PositionError::WrongSectionCount(sections.len()));
    }

    let (dim, side, turns, max_turns) = parse_header(sections[0])?;
    let mut state = GameState::empty(dim, max_turns);
    state.next_player = side;
    state.turns_played = turns;

    parse_units(sections[1], &mut state)?;
    parse_lost_ais(sections[2], &mut state)?;

    Ok(state)
}

/// Encodes a state as a canonical position string. Units are listed
/// row-major, so equal states always encode identically.
pub fn encode_position(state: &GameState) -> String {
    let mut result = String::with_capacity(128);

    result.push_str(&format!(
        "{}{}:{}:{}",
        state.dim(),
        state.next_player.short_char(),
        state.turns_played,
        state.max_turns
    ));

    result.push('/');

    let units: Vec<String> = state
        .board
        .units()
        .map(|(c, u)| format!("{}{}", u, c))
        .collect();
    if units.is_empty() {
        result.push('-');
    } else {
        result.push_str(&units.join(","));
    }

    result.push('/');

    let lost: String = [Player::Attacker, Player::Defender]
        .into_iter()
        .filter(|&p| state.has_lost_ai(p))
        .map(Player::short_char)
        .collect();
    if lost.is_empty() {
        result.push('-');
    } else {
        result.push_str(&lost);
    }

    result
}
