use serde::Serialize;

pub mod expectiminimax;
pub mod move_order;
pub mod tt;
pub mod tt_array;

pub use expectiminimax::Expectiminimax;
pub use move_order::{order_moves, sorted_moves};
pub use tt::{Bound, InMemoryTT, TTEntry, TTStats, TranspositionTable};
pub use tt_array::FixedTT;

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub start_depth: u8,
    /// Depths up to this one always complete; deeper ones may abort on the node limit.
    pub min_depth: u8,
    pub max_depth: u8,
    pub max_nodes: u64,
    /// Assumed growth factor before two depths have been timed.
    pub default_branching: f64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            start_depth: 1,
            min_depth: 2,
            max_depth: 2,
            max_nodes: 2_000_000,
            default_branching: 10.0,
        }
    }
}

/// Summary of one `best_action` call, printed by the binary as JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    pub strategy: &'static str,
    pub value: f64,
    pub nodes: u64,
    pub cutoffs: u64,
    pub depth: u8,
    pub iterations: u64,
    pub transpositions: u64,
    pub aborted: bool,
    pub elapsed_secs: f64,
}

impl SearchReport {
    #[inline]
    pub fn new(strategy: &'static str) -> Self {
        Self { strategy, ..Self::default() }
    }
}
