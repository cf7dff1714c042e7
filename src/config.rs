//! Game configuration.
//!
//! A single `GameConfig` value is built once at startup (defaults, then an
//! optional JSON file, then command-line overrides), validated, and threaded
//! explicitly through the game loop and every search.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Player, RoundLimit, DEFAULT_DIM, DEFAULT_MAX_TURNS, MAX_DIM, STANDARD_MIN_DIM};
use crate::eval::Heuristic;

/// Errors raised while building or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("max time must be a finite, non-negative number of seconds (got {0})")]
    InvalidTime(f64),

    #[error("max turns must be at least 1")]
    ZeroTurns,

    #[error("board dimension {0} is outside {min}..={max}", min = STANDARD_MIN_DIM, max = MAX_DIM)]
    DimensionOutOfRange(u8),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Who controls each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    /// Human attacker against an AI defender.
    HumanVsAi,
    /// AI attacker against a human defender.
    AiVsHuman,
    AiVsAi,
}

impl GameMode {
    /// Returns true if `player` is driven by the search.
    pub const fn is_ai(self, player: Player) -> bool {
        match (self, player) {
            (GameMode::AiVsAi, _) => true,
            (GameMode::HumanVsAi, Player::Defender) => true,
            (GameMode::AiVsHuman, Player::Attacker) => true,
            _ => false,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "human-vs-human",
            GameMode::HumanVsAi => "human-vs-ai",
            GameMode::AiVsHuman => "ai-vs-human",
            GameMode::AiVsAi => "ai-vs-ai",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = String;

    /// Accepts the kebab-case names plus the short aliases `manual`
    /// (both human), `attacker` (human attacker), `defender` (human
    /// defender) and `auto` (both AI).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human-vs-human" | "manual" => Ok(GameMode::HumanVsHuman),
            "human-vs-ai" | "attacker" => Ok(GameMode::HumanVsAi),
            "ai-vs-human" | "defender" => Ok(GameMode::AiVsHuman),
            "ai-vs-ai" | "auto" => Ok(GameMode::AiVsAi),
            _ => Err(format!("unknown game mode '{}'", s)),
        }
    }
}

/// All tunable game and search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Enables alpha-beta pruning. Disabling it only costs time.
    pub alpha_beta: bool,
    /// Wall-clock budget per AI move, in seconds.
    pub max_time: f64,
    /// Plies before the game ends with the round-limit outcome.
    pub max_turns: u32,
    /// Deepest iteration the controller attempts.
    pub max_depth: u32,
    /// Heuristic used by the attacker, and by the defender unless overridden.
    pub heuristic: Heuristic,
    pub defender_heuristic: Option<Heuristic>,
    pub dim: u8,
    pub round_limit: RoundLimit,
    /// Random plies played before search takes over (self-play only).
    pub random_plies: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: GameMode::default(),
            alpha_beta: true,
            max_time: 5.0,
            max_turns: DEFAULT_MAX_TURNS,
            max_depth: 4,
            heuristic: Heuristic::default(),
            defender_heuristic: None,
            dim: DEFAULT_DIM,
            round_limit: RoundLimit::default(),
            random_plies: 0,
        }
    }
}

impl GameConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !self.max_time.is_finite() || self.max_time < 0.0 {
            return Err(ConfigError::InvalidTime(self.max_time));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroTurns);
        }
        if !(STANDARD_MIN_DIM..=MAX_DIM).contains(&self.dim) {
            return Err(ConfigError::DimensionOutOfRange(self.dim));
        }
        Ok(())
    }

    /// The heuristic `player`'s searches evaluate with.
    pub fn heuristic_for(&self, player: Player) -> Heuristic {
        match player {
            Player::Attacker => self.heuristic,
            Player::Defender => self.defender_heuristic.unwrap_or(self.heuristic),
        }
    }

    /// Per-move search budget. Assumes the config has been validated.
    pub fn time_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_time).unwrap_or(Duration::MAX)
    }

    /// The standard opening position for this configuration.
    pub fn initial_state(&self) -> GameState {
        GameState::standard(self.dim, self.max_turns).with_round_limit(self.round_limit)
    }
}
