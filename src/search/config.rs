//! Minimax search parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimax search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched below the root.
    pub depth: u32,

    /// Children kept per node, best heuristic score first.
    /// Bounds the branching factor on large boards.
    pub top_k: usize,

    /// Optional wall-clock budget. Nodes reached after it expires are
    /// evaluated as leaves.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            top_k: 8,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
