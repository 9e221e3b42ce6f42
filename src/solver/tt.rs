use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;

use crate::hash::Fingerprint;
use crate::state::Move;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Bound type used for alpha-beta aware TT entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    #[default]
    Exact,
    Lower, // value is a lower bound (fail high)
    Upper, // value is an upper bound (fail low)
}

impl Bound {
    /// Classify a node value against the window it was searched with.
    #[inline]
    pub fn classify(value: f64, alpha: f64, beta: f64) -> Self {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

/// Transposition table entry storing value bounds, depth, and the best move for ordering/PV.
#[derive(Debug, Clone, Copy, Default)]
pub struct TTEntry {
    pub lock: u32,
    pub depth: u8, // remaining search depth when stored
    pub flag: Bound,
    pub value: f64, // from the searching seat's perspective
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub puts: u64,
    pub exact_count: u64,
    pub lower_count: u64,
    pub upper_count: u64,
}

impl TTStats {
    #[inline]
    pub(crate) fn record(&mut self, flag: Bound) {
        self.puts = self.puts.saturating_add(1);
        match flag {
            Bound::Exact => self.exact_count = self.exact_count.saturating_add(1),
            Bound::Lower => self.lower_count = self.lower_count.saturating_add(1),
            Bound::Upper => self.upper_count = self.upper_count.saturating_add(1),
        }
    }
}

pub trait TranspositionTable {
    /// Entry whose lock matches the fingerprint, if any.
    fn get(&self, fp: Fingerprint) -> Option<TTEntry>;
    /// Store unconditionally; the lock is taken from the fingerprint.
    fn put(&mut self, fp: Fingerprint, entry: TTEntry);
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn stats(&self) -> TTStats;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded map keyed by the full fingerprint. No collisions; used to cross-check
/// [`FixedTT`](super::tt_array::FixedTT).
#[derive(Debug, Default)]
pub struct InMemoryTT {
    map: HbHashMap<u64, TTEntry, FastHasher>,
    stats: TTStats,
}

impl InMemoryTT {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self { map: HbHashMap::with_capacity_and_hasher(cap, FastHasher::default()), stats: TTStats::default() }
    }
}

impl TranspositionTable for InMemoryTT {
    #[inline]
    fn get(&self, fp: Fingerprint) -> Option<TTEntry> {
        self.map.get(&fp.combined()).copied()
    }

    #[inline]
    fn put(&mut self, fp: Fingerprint, mut entry: TTEntry) {
        self.stats.record(entry.flag);
        entry.lock = fp.lock;
        self.map.insert(fp.combined(), entry);
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn stats(&self) -> TTStats {
        self.stats
    }
}
