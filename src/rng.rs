use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64;

/// Generator used by the default policy, teammate sampling and Zobrist key generation.
pub type GameRng = Pcg64;

/// Deterministic RNG for a plain seed.
#[inline]
pub fn rng_from_seed(seed: u64) -> GameRng {
    Pcg64::seed_from_u64(seed)
}

/// Deterministic RNG factory for a given (seed, game_id, seat) triple.
///
/// Derives a per-strategy 64-bit seed as `seed ^ game_id.rotate_left(8) ^ seat`, so each
/// seat of each simulated game gets its own reproducible stream.
#[inline]
pub fn rng_for_game(seed: u64, game_id: u64, seat: u8) -> GameRng {
    let derived: u64 = seed ^ game_id.rotate_left(8) ^ (seat as u64);
    Pcg64::seed_from_u64(derived)
}

/// First output of [`rng_for_game`], used to seed a strategy's own generator.
#[inline]
pub fn seed_for_seat(seed: u64, game_id: u64, seat: u8) -> u64 {
    rng_for_game(seed, game_id, seat).next_u64()
}
