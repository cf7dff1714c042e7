//! Depth- and time-bounded minimax with optional alpha-beta pruning.
//!
//! The searcher works on a private `&mut GameState`, applying each action
//! and undoing it on return. Scores are always from the perspective of the
//! player to move at the root: that player maximizes, the opponent
//! minimizes. Siblings are expanded in generation order and a child only
//! replaces the current best on strict improvement, so among equal scores
//! the first legal action wins.

use std::time::Duration;

use serde::Serialize;

use crate::board::{Action, GameState, Player};
use crate::eval::{evaluate, Heuristic, Score, WIN_SCORE};
use crate::movegen::generate_unchecked;
use crate::resolve::apply::apply_unchecked;
use crate::resolve::{outcome, settled_outcome, undo_action, Outcome};

use super::limits::{Deadline, CLOCK_CHECK_INTERVAL};

/// Bound wider than any reachable score.
const INFINITY: Score = WIN_SCORE + 1;

/// Counters collected during a search. They never influence the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Deepest fully completed iteration (0 for the static fallback).
    pub depth_reached: u32,
    pub nodes: u64,
    /// Static evaluations, in total and per ply from the root.
    pub evaluations: u64,
    pub evaluations_per_depth: Vec<u64>,
    /// Sibling expansions skipped by alpha-beta.
    pub cutoffs: u64,
    pub elapsed: Duration,
}

/// Score of a finished game for `perspective`, `ply` half-moves from the root.
pub fn terminal_score(outcome: Outcome, perspective: Player, ply: u32) -> Score {
    match outcome {
        Outcome::Draw => 0,
        Outcome::Win(p) if p == perspective => WIN_SCORE - ply as Score,
        Outcome::Win(_) => -(WIN_SCORE - ply as Score),
    }
}

/// Returns true if `score` is a proven win or loss.
pub fn is_decisive(score: Score) -> bool {
    score.abs() > WIN_SCORE / 2
}

/// One search invocation's engine state.
pub struct Searcher {
    heuristic: Heuristic,
    perspective: Player,
    alpha_beta: bool,
    deadline: Deadline,
    aborted: bool,
    stats: SearchStats,
    /// Action buffers indexed by ply, reused across nodes and iterations.
    buffers: Vec<Vec<Action>>,
}

impl Searcher {
    pub fn new(heuristic: Heuristic, perspective: Player, alpha_beta: bool, deadline: Deadline) -> Self {
        Searcher {
            heuristic,
            perspective,
            alpha_beta,
            deadline,
            aborted: false,
            stats: SearchStats::default(),
            buffers: Vec::new(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(crate) fn into_stats(self) -> SearchStats {
        self.stats
    }

    /// Returns true if the deadline interrupted the last iteration.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Searches every root action to `depth` plies (`depth >= 1`).
    ///
    /// Returns the best action and its backed-up score, or `None` if the
    /// deadline expired before the iteration completed.
    pub fn search_root(
        &mut self,
        state: &mut GameState,
        root_actions: &[Action],
        depth: u32,
    ) -> Option<(Action, Score)> {
        debug_assert!(depth >= 1);
        debug_assert_eq!(state.next_player, self.perspective);
        self.aborted = false;
        self.stats.nodes += 1;

        let mut best: Option<(Action, Score)> = None;
        let mut alpha = -INFINITY;
        for action in root_actions {
            if self.deadline.expired() {
                self.aborted = true;
            }
            if self.aborted {
                return None;
            }
            let undo = apply_unchecked(state, action);
            let score = self.minimax(state, depth - 1, alpha, INFINITY, 1);
            undo_action(state, &undo);
            if self.aborted {
                return None;
            }
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((*action, score));
            }
            if self.alpha_beta {
                alpha = alpha.max(score);
            }
        }
        best
    }

    /// Scores every root action statically and ignores the deadline.
    pub fn static_pass(&mut self, state: &mut GameState, root_actions: &[Action]) -> Option<(Action, Score)> {
        let mut best: Option<(Action, Score)> = None;
        for action in root_actions {
            let undo = apply_unchecked(state, action);
            self.stats.nodes += 1;
            let score = match outcome(state) {
                Some(o) => terminal_score(o, self.perspective, 1),
                None => self.static_eval(state, 1),
            };
            undo_action(state, &undo);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((*action, score));
            }
        }
        best
    }

    fn minimax(&mut self, state: &mut GameState, depth: u32, mut alpha: Score, mut beta: Score, ply: u32) -> Score {
        self.stats.nodes += 1;
        if self.stats.nodes % CLOCK_CHECK_INTERVAL == 0 && self.deadline.expired() {
            self.aborted = true;
        }
        if self.aborted {
            return self.static_eval(state, ply);
        }
        if depth == 0 {
            return match outcome(state) {
                Some(o) => terminal_score(o, self.perspective, ply),
                None => self.static_eval(state, ply),
            };
        }
        if let Some(o) = settled_outcome(state) {
            return terminal_score(o, self.perspective, ply);
        }

        let mut actions = self.take_buffer(ply);
        generate_unchecked(state, &mut actions);
        if actions.is_empty() {
            self.return_buffer(ply, actions);
            return match outcome(state) {
                Some(o) => terminal_score(o, self.perspective, ply),
                None => panic!("non-terminal state with no legal actions"),
            };
        }

        let maximizing = state.next_player == self.perspective;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        let count = actions.len();
        for (i, action) in actions.iter().enumerate() {
            let undo = apply_unchecked(state, action);
            let score = self.minimax(state, depth - 1, alpha, beta, ply + 1);
            undo_action(state, &undo);

            if maximizing {
                if score > best {
                    best = score;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                }
                beta = beta.min(best);
            }
            if self.aborted {
                break;
            }
            if self.alpha_beta && alpha >= beta {
                self.stats.cutoffs += (count - i - 1) as u64;
                break;
            }
        }
        self.return_buffer(ply, actions);
        best
    }

    fn static_eval(&mut self, state: &GameState, ply: u32) -> Score {
        self.stats.evaluations += 1;
        let ply = ply as usize;
        if self.stats.evaluations_per_depth.len() <= ply {
            self.stats.evaluations_per_depth.resize(ply + 1, 0);
        }
        self.stats.evaluations_per_depth[ply] += 1;
        evaluate(self.heuristic, state, self.perspective)
    }

    fn take_buffer(&mut self, ply: u32) -> Vec<Action> {
        let ply = ply as usize;
        if self.buffers.len() <= ply {
            self.buffers.resize_with(ply + 1, Vec::new);
        }
        std::mem::take(&mut self.buffers[ply])
    }

    fn return_buffer(&mut self, ply: u32, buf: Vec<Action>) {
        self.buffers[ply as usize] = buf;
    }
}
