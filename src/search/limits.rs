//! Search time limits.

use std::time::{Duration, Instant};

/// Nodes expanded between two clock reads inside the tree.
pub const CLOCK_CHECK_INTERVAL: u64 = 64;

/// A wall-clock deadline measured from the moment the search started.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        let start = Instant::now();
        Deadline {
            start,
            at: start.checked_add(budget),
        }
    }

    /// A deadline that never expires.
    pub fn none() -> Self {
        Deadline {
            start: Instant::now(),
            at: None,
        }
    }

    pub fn expired(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    /// Time since the deadline was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
