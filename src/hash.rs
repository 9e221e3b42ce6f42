use rand::Rng;

use crate::rng::rng_from_seed;
use crate::state::GameState;
use crate::types::{cells_of, Player, CELLS};

/// Distinct spent-points values with their own key; larger counters share the last slot.
pub const SPENT_SLOTS: usize = 128;

// Domain tags (arbitrary but fixed)
const DOM_HASH: u64 = 0xB0A2_1D5E_0000_0001;
const DOM_LOCK: u64 = 0xB0A2_1D5E_0000_00A0;

/// (hash, lock) pair identifying a state. The hash picks a bucket, the lock verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint {
    pub hash: u32,
    pub lock: u32,
}

impl Fingerprint {
    /// Both halves packed into one key for hash-map lookups.
    #[inline]
    pub fn combined(self) -> u64 {
        u64::from(self.hash) | (u64::from(self.lock) << 32)
    }
}

/// One independent set of random codes.
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    init: u32,
    player: [u32; 4],
    remaining: [u32; 4],
    spent: [[u32; SPENT_SLOTS]; 4],
    cells: [[u32; CELLS]; 4],
}

impl ZobristKeys {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut keys = Self {
            init: rng.gen(),
            player: [0; 4],
            remaining: [0; 4],
            spent: [[0; SPENT_SLOTS]; 4],
            cells: [[0; CELLS]; 4],
        };
        for slot in &mut keys.remaining {
            *slot = rng.gen();
        }
        for p in 0..4 {
            keys.player[p] = rng.gen();
            for code in &mut keys.cells[p] {
                *code = rng.gen();
            }
            for code in &mut keys.spent[p] {
                *code = rng.gen();
            }
        }
        keys
    }

    /// Full recomputation from state components.
    pub fn key(&self, state: &GameState) -> u32 {
        let mover = state.player();
        let mut z = self.init;
        z ^= self.player[mover.index()];
        z ^= self.remaining[state.remaining() as usize & 3];
        for p in Player::ALL {
            let spent = (state.spent(p) as usize).min(SPENT_SLOTS - 1);
            z ^= self.spent[p.index()][spent];
            for cell in cells_of(state.mask(p)) {
                z ^= self.cells[p.index()][cell as usize];
            }
        }
        z
    }
}

/// The two key sets used for the hash and the lock.
#[derive(Debug, Clone)]
pub struct Zobrist {
    hash: ZobristKeys,
    lock: ZobristKeys,
}

impl Zobrist {
    /// Both key sets are drawn from separately seeded generators.
    pub fn new(seed: u64) -> Self {
        let mut hash_rng = rng_from_seed(seed ^ DOM_HASH);
        let mut lock_rng = rng_from_seed(seed ^ DOM_LOCK);
        Self {
            hash: ZobristKeys::generate(&mut hash_rng),
            lock: ZobristKeys::generate(&mut lock_rng),
        }
    }

    #[inline]
    pub fn fingerprint(&self, state: &GameState) -> Fingerprint {
        Fingerprint { hash: self.hash.key(state), lock: self.lock.key(state) }
    }
}
