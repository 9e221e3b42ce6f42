//! Statistics shared by every tree node that reaches the same position.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;

use crate::hash::Fingerprint;
use crate::state::Move;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

pub type StatsId = u32;

/// Running mean of simulation results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub value: f64,
    pub visits: u32,
}

impl Stats {
    #[inline]
    pub fn update(&mut self, sample: f64) {
        let n = f64::from(self.visits);
        self.value = (self.value * n + sample) / (n + 1.0);
        self.visits += 1;
    }
}

/// Monte Carlo statistics of a position plus all-moves-as-first statistics of the
/// moves playable from it.
#[derive(Debug, Clone, Default)]
pub struct SharedStats {
    pub mc: Stats,
    pub rave: HbHashMap<Move, Stats, FastHasher>,
}

/// Records keyed by the combined fingerprint. Cleared between searches.
#[derive(Debug, Default)]
pub struct StatsPool {
    records: Vec<SharedStats>,
    index: HbHashMap<u64, StatsId, FastHasher>,
    transpositions: u64,
}

impl StatsPool {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            records: Vec::with_capacity(cap),
            index: HbHashMap::with_capacity_and_hasher(cap, FastHasher::default()),
            transpositions: 0,
        }
    }

    /// Record for a position, and whether it was just created.
    pub fn get_or_create(&mut self, fp: Fingerprint) -> (StatsId, bool) {
        if let Some(&id) = self.index.get(&fp.combined()) {
            self.transpositions += 1;
            return (id, false);
        }
        let id = self.records.len() as StatsId;
        self.records.push(SharedStats::default());
        self.index.insert(fp.combined(), id);
        (id, true)
    }

    #[inline]
    pub fn get(&self, id: StatsId) -> &SharedStats {
        &self.records[id as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: StatsId) -> &mut SharedStats {
        &mut self.records[id as usize]
    }

    /// Lookups that found an existing record.
    #[inline]
    pub fn transpositions(&self) -> u64 {
        self.transpositions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
        self.transpositions = 0;
    }
}
