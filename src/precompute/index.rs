//! Dense ranking of 4-pawn configurations.
//!
//! A configuration with cells `p0 < p1 < p2 < p3` ranks as
//! `C(p0,1) + C(p1,2) + C(p2,3) + C(p3,4)` (colexicographic order), a bijection
//! onto `0..C(64,4)`.

use crate::rules::PAWNS;

/// Number of 4-subsets of 64 cells.
pub const CONFIGS: usize = 635_376;

const fn binomials() -> [[u32; 5]; 65] {
    let mut t = [[0u32; 5]; 65];
    let mut n = 0;
    while n <= 64 {
        t[n][0] = 1;
        let mut k = 1;
        while k <= 4 {
            if n > 0 {
                t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            }
            k += 1;
        }
        n += 1;
    }
    t
}

/// `BINOMIAL[n][k] == C(n, k)` for `n <= 64`, `k <= 4`.
pub static BINOMIAL: [[u32; 5]; 65] = binomials();

/// Rank of a mask with exactly four bits set.
#[inline]
pub fn config_index(mask: u64) -> usize {
    debug_assert_eq!(mask.count_ones(), PAWNS, "configuration must hold exactly four pawns");
    let mut b = mask;
    let mut idx = 0u32;
    let mut k = 1;
    while b != 0 && k <= 4 {
        let pos = b.trailing_zeros() as usize;
        idx += BINOMIAL[pos][k];
        b &= b - 1;
        k += 1;
    }
    idx as usize
}

/// Inverse of [`config_index`].
pub fn config_mask(index: usize) -> u64 {
    debug_assert!(index < CONFIGS);
    let mut rem = index as u32;
    let mut mask = 0u64;
    let mut upper = 64usize;
    for k in (1..=4).rev() {
        let mut p = upper - 1;
        while BINOMIAL[p][k] > rem {
            p -= 1;
        }
        mask |= 1u64 << p;
        rem -= BINOMIAL[p][k];
        upper = p;
    }
    mask
}

/// Every configuration, in rank order.
pub fn all_configs() -> impl Iterator<Item = u64> {
    (3u32..64).flat_map(|d| {
        (2..d).flat_map(move |c| {
            (1..c).flat_map(move |b| {
                (0..b).map(move |a| 1u64 << a | 1u64 << b | 1u64 << c | 1u64 << d)
            })
        })
    })
}
