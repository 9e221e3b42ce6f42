use std::mem::size_of;

use super::tt::{TTEntry, TTStats, TranspositionTable};
use crate::hash::Fingerprint;

/// Bucket count of the default table (prime).
pub const DEFAULT_BUCKETS: usize = 1_000_003;

/// Fixed-size direct-mapped transposition table.
/// - Index = hash % buckets
/// - The 32-bit lock verifies a hit
/// - Replacement: always overwrite
pub struct FixedTT {
    entries: Vec<Option<TTEntry>>,
    count: usize,
    stats: TTStats,
}

impl Default for FixedTT {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl FixedTT {
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self { entries: vec![None; buckets], count: 0, stats: TTStats::default() }
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, fp: Fingerprint) -> usize {
        fp.hash as usize % self.entries.len()
    }

    /// Approximate bytes per bucket.
    #[inline]
    pub fn bytes_per_entry() -> usize {
        size_of::<Option<TTEntry>>()
    }

    #[inline]
    pub fn approx_bytes(&self) -> usize {
        self.entries.len().saturating_mul(Self::bytes_per_entry())
    }
}

impl TranspositionTable for FixedTT {
    #[inline]
    fn get(&self, fp: Fingerprint) -> Option<TTEntry> {
        self.entries[self.index(fp)].filter(|e| e.lock == fp.lock)
    }

    #[inline]
    fn put(&mut self, fp: Fingerprint, mut entry: TTEntry) {
        self.stats.record(entry.flag);
        entry.lock = fp.lock;
        let idx = self.index(fp);
        if self.entries[idx].replace(entry).is_none() {
            self.count += 1;
        }
    }

    fn clear(&mut self) {
        self.entries.fill(None);
        self.count = 0;
        self.stats = TTStats::default();
    }

    #[inline]
    fn len(&self) -> usize {
        self.count
    }

    #[inline]
    fn stats(&self) -> TTStats {
        self.stats
    }
}
