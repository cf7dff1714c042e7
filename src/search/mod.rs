//! Adversarial search.
//!
//! `minimax` is the engine proper; `controller` wraps it with the per-move
//! deadline and iterative deepening; `limits` holds the clock.

pub mod controller;
pub mod limits;
pub mod minimax;

pub use controller::{choose_action, SearchError, SearchResult};
pub use limits::{Deadline, CLOCK_CHECK_INTERVAL};
pub use minimax::{terminal_score, SearchStats, Searcher};
