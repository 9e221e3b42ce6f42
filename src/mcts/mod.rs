//! Monte Carlo tree search with RAVE for the seat to move.

pub mod arena;
pub mod node;
pub mod search;
pub mod stats;

pub use arena::Arena;
pub use node::{Node, NodeId};
pub use search::{adapted_score, Mcts};
pub use stats::{SharedStats, Stats, StatsPool};

#[derive(Debug, Clone, Copy)]
pub struct MctsConfig {
    /// Iterations before the search may stop on a consistent principal line.
    pub min_iterations: u32,
    /// Hard stop.
    pub max_iterations: u32,
    /// Nodes at this many seat changes below the root are not expanded.
    pub max_level: u16,
    /// Exploration constant.
    pub uct_k: f64,
    /// Own visits before RAVE and Monte Carlo disagreement shrinks the RAVE share.
    pub rave_min_visits: u32,
    /// Simulations stop this many turns after the start of the current round.
    pub horizon_turns: u16,
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            min_iterations: 30_000,
            max_iterations: 32_000,
            max_level: 4,
            uct_k: 0.1,
            rave_min_visits: 100,
            horizon_turns: 16,
            seed: 0,
        }
    }
}
