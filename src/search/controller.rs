//! Search controller.
//!
//! Drives one move decision: sets the per-move deadline, runs iterative
//! deepening from depth 1 up to the configured maximum, keeps the result of
//! the deepest completed iteration, and falls back to a static one-ply pass
//! when no iteration completes in time.

use std::io::Write;

use crate::board::{Action, GameState};
use crate::config::GameConfig;
use crate::eval::Score;
use crate::movegen::legal_actions;
use crate::resolve::{outcome, Outcome};

use super::limits::Deadline;
use super::minimax::{is_decisive, SearchStats, Searcher};

/// Errors from [`choose_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("the game is already over: {0}")]
    GameOver(Outcome),
}

/// Result of a search: the chosen action plus diagnostics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub action: Action,
    /// Backed-up score from the searching player's perspective.
    pub score: Score,
    pub stats: SearchStats,
}

/// Chooses an action for the side to move in `state`.
///
/// Emits one `info depth D nodes N score S time T` line per completed
/// iteration to `out`. The state itself is never modified.
///
/// The game ends at the tighter of the state's own turn limit and
/// `config.max_turns`, both at the root and inside the search tree.
pub fn choose_action<W: Write>(
    state: &GameState,
    config: &GameConfig,
    out: &mut W,
) -> Result<SearchResult, SearchError> {
    let mut root = state.clone();
    root.max_turns = root.max_turns.min(config.max_turns);
    if let Some(o) = outcome(&root) {
        return Err(SearchError::GameOver(o));
    }

    let deadline = Deadline::after(config.time_budget());
    let perspective = root.next_player;
    let root_actions = legal_actions(&root);
    let mut scratch = root.clone();
    let mut searcher = Searcher::new(
        config.heuristic_for(perspective),
        perspective,
        config.alpha_beta,
        deadline,
    );

    let mut best: Option<(Action, Score)> = None;
    let mut depth_reached = 0;

    // With a single option there is nothing to compare.
    if root_actions.len() > 1 {
        for depth in 1..=config.max_depth {
            let Some((action, score)) = searcher.search_root(&mut scratch, &root_actions, depth) else {
                break;
            };
            best = Some((action, score));
            depth_reached = depth;

            let _ = writeln!(
                out,
                "info depth {} nodes {} score {} time {}",
                depth,
                searcher.stats().nodes,
                score,
                deadline.elapsed().as_millis()
            );

            if is_decisive(score) || deadline.expired() {
                break;
            }
        }
    }

    let (action, score) = match best {
        Some(b) => b,
        None => match searcher.static_pass(&mut scratch, &root_actions) {
            Some(b) => b,
            None => panic!("non-terminal state with no legal actions"),
        },
    };
    debug_assert_eq!(scratch, root);

    let mut stats = searcher.into_stats();
    stats.depth_reached = depth_reached;
    stats.elapsed = deadline.elapsed();
    Ok(SearchResult {
        action,
        score,
        stats,
    })
}
