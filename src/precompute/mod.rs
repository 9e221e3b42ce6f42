//! Tables built once from the wall layout and shared read-only by every state and search.

use std::time::Instant;

use tracing::info;

use crate::board::Layout;
use crate::hash::{Fingerprint, Zobrist};
use crate::state::{GameState, Move};
use crate::types::Player;

pub mod distance;
pub mod index;
pub mod transitions;

pub use distance::{DistanceTable, UNREACHED};
pub use index::{all_configs, config_index, config_mask, CONFIGS};
pub use transitions::{transitions_for, Transition, TransitionTable, MAX_ROW};

/// Seed of the Zobrist codes unless the caller picks another.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x00C0_FFEE;

/// Process-wide precomputed context.
#[derive(Debug, Clone)]
pub struct Tables {
    layout: Layout,
    transitions: TransitionTable,
    distances: DistanceTable,
    zobrist: Zobrist,
}

impl Tables {
    pub fn build(layout: Layout) -> Self {
        Self::build_with_seed(layout, DEFAULT_ZOBRIST_SEED)
    }

    pub fn build_with_seed(layout: Layout, zobrist_seed: u64) -> Self {
        let start = Instant::now();
        let transitions = TransitionTable::build(&layout);
        let transitions_secs = start.elapsed().as_secs_f64();
        info!(
            entries = transitions.len(),
            mib = transitions.approx_bytes() as f64 / (1024.0 * 1024.0),
            secs = transitions_secs,
            "[precompute] transition table built"
        );

        let start = Instant::now();
        let distances = DistanceTable::build(&transitions);
        let distances_secs = start.elapsed().as_secs_f64();
        info!(secs = distances_secs, "[precompute] goal distances built");

        Self { layout, transitions, distances, zobrist: Zobrist::new(zobrist_seed) }
    }

    #[inline]
    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Candidate transitions for a configuration.
    #[inline]
    pub fn row(&self, mask: u64) -> &[Transition] {
        self.transitions.row(mask)
    }

    /// Goal distance of `mask` for `player`.
    #[inline]
    pub fn distance(&self, player: Player, mask: u64) -> u8 {
        self.distances.get(player, mask)
    }

    #[inline]
    pub fn fingerprint(&self, state: &GameState) -> Fingerprint {
        self.zobrist.fingerprint(state)
    }

    /// Point cost of a non-pass move.
    #[inline]
    pub fn move_cost(&self, mv: Move) -> u8 {
        self.layout.move_cost(mv.source(), mv.dest())
    }
}
