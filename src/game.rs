//! Game loop state.
//!
//! `Game` owns the authoritative `GameState` plus the configuration, the
//! cumulative search statistics and the move history. Human actions arrive
//! as notation and are validated before they touch the state; AI turns go
//! through the search controller. Everything that happened can be written
//! out as a JSONL transcript.

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::board::{Action, Coord, GameState, Player};
use crate::config::{ConfigError, GameConfig};
use crate::eval::Score;
use crate::movegen::{classify, IllegalActionError};
use crate::protocol::{encode_position, parse_action_pair, NotationError};
use crate::resolve::{apply_action, outcome, Outcome};
use crate::search::{choose_action, SearchError, SearchStats};

/// Errors from a human move.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Illegal(#[from] IllegalActionError),
}

/// Search statistics accumulated over a whole game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameStats {
    pub ai_turns: u32,
    pub nodes: u64,
    pub evaluations: u64,
    /// Evaluations per ply from the root, summed over all searches.
    pub evaluations_per_depth: Vec<u64>,
    pub search_seconds: f64,
}

impl GameStats {
    fn record(&mut self, stats: &SearchStats) {
        self.ai_turns += 1;
        self.nodes += stats.nodes;
        self.evaluations += stats.evaluations;
        if self.evaluations_per_depth.len() < stats.evaluations_per_depth.len() {
            self.evaluations_per_depth
                .resize(stats.evaluations_per_depth.len(), 0);
        }
        for (total, n) in self
            .evaluations_per_depth
            .iter_mut()
            .zip(&stats.evaluations_per_depth)
        {
            *total += n;
        }
        self.search_seconds += stats.elapsed.as_secs_f64();
    }

    /// Share of evaluations at each ply, in percent.
    pub fn depth_percentages(&self) -> Vec<f64> {
        if self.evaluations == 0 {
            return Vec::new();
        }
        self.evaluations_per_depth
            .iter()
            .map(|&n| n as f64 * 100.0 / self.evaluations as f64)
            .collect()
    }

    /// Evaluations per second of search time.
    pub fn eval_rate(&self) -> f64 {
        if self.search_seconds > 0.0 {
            self.evaluations as f64 / self.search_seconds
        } else {
            0.0
        }
    }
}

/// Search details attached to an AI move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub score: Score,
    pub depth: u32,
    pub nodes: u64,
    pub evaluations: u64,
    pub elapsed_ms: u64,
}

/// One played ply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRecord {
    /// Turn number of the ply, starting at 1.
    pub turn: u32,
    pub player: Player,
    pub action: Action,
    /// The action in game notation (`D2 C2`).
    pub notation: String,
    /// Present for AI moves.
    pub search: Option<SearchSummary>,
    /// Position after the ply.
    pub position: String,
}

/// One line of a JSONL transcript.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum TranscriptLine<'a> {
    Config {
        config: &'a GameConfig,
        position: String,
    },
    Move(&'a MoveRecord),
    Result {
        outcome: Option<Outcome>,
        turns_played: u32,
        stats: &'a GameStats,
    },
}

/// A game in progress.
pub struct Game {
    state: GameState,
    config: GameConfig,
    initial_position: String,
    stats: GameStats,
    history: Vec<MoveRecord>,
}

impl Game {
    /// Starts a game from the standard opening.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = config.initial_state();
        Ok(Self::with_state(config, state))
    }

    /// Starts a game from an arbitrary position. The configured turn limit
    /// and round-limit outcome replace the state's own.
    pub fn from_state(config: GameConfig, state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = state.with_round_limit(config.round_limit);
        state.max_turns = config.max_turns;
        Ok(Self::with_state(config, state))
    }

    fn with_state(config: GameConfig, state: GameState) -> Self {
        Game {
            initial_position: encode_position(&state),
            state,
            config,
            stats: GameStats::default(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        outcome(&self.state)
    }

    /// Returns true if the side to move is controlled by the search.
    pub fn is_ai_turn(&self) -> bool {
        self.config.mode.is_ai(self.state.next_player)
    }

    /// Plays a human move given as `"<from> <to>"`.
    pub fn play_human(&mut self, input: &str) -> Result<Action, InputError> {
        let (from, to) = parse_action_pair(input)?;
        Ok(self.play_cells(from, to)?)
    }

    /// Plays the action denoted by a source/destination pair.
    pub fn play_cells(&mut self, from: Coord, to: Coord) -> Result<Action, IllegalActionError> {
        let action = classify(&self.state, from, to)?;
        self.play_action(action)?;
        Ok(action)
    }

    /// Plays an explicit action without search details.
    pub fn play_action(&mut self, action: Action) -> Result<&MoveRecord, IllegalActionError> {
        self.commit(action, None)
    }

    /// Lets the search pick and play the next move. `info` lines go to `out`.
    pub fn play_ai_turn<W: Write>(&mut self, out: &mut W) -> Result<&MoveRecord, SearchError> {
        let result = choose_action(&self.state, &self.config, out)?;
        self.stats.record(&result.stats);
        let summary = SearchSummary {
            score: result.score,
            depth: result.stats.depth_reached,
            nodes: result.stats.nodes,
            evaluations: result.stats.evaluations,
            elapsed_ms: result.stats.elapsed.as_millis() as u64,
        };
        match self.commit(result.action, Some(summary)) {
            Ok(record) => Ok(record),
            Err(e) => panic!("search chose illegal action {}: {}", result.action, e),
        }
    }

    fn commit(
        &mut self,
        action: Action,
        search: Option<SearchSummary>,
    ) -> Result<&MoveRecord, IllegalActionError> {
        let player = self.state.next_player;
        apply_action(&mut self.state, &action)?;
        self.history.push(MoveRecord {
            turn: self.state.turns_played,
            player,
            action,
            notation: action.to_string(),
            search,
            position: encode_position(&self.state),
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Writes the game as JSONL: a config line, one line per move, and a
    /// result line.
    pub fn write_transcript<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut lines = Vec::with_capacity(self.history.len() + 2);
        lines.push(TranscriptLine::Config {
            config: &self.config,
            position: self.initial_position.clone(),
        });
        lines.extend(self.history.iter().map(TranscriptLine::Move));
        lines.push(TranscriptLine::Result {
            outcome: self.outcome(),
            turns_played: self.state.turns_played,
            stats: &self.stats,
        });
        for line in &lines {
            serde_json::to_writer(&mut *out, line)?;
            writeln!(out)?;
        }
        out.flush()
    }
}
