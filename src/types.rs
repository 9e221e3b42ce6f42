use serde::{Deserialize, Serialize};

/// Board side length.
pub const N: u8 = 8;
/// Number of cells on the board.
pub const CELLS: usize = 64;

/// Seat identity. Declaration order is the fixed rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Player {
    Yellow = 0,
    Black = 1,
    White = 2,
    Red = 3,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::Yellow, Player::Black, Player::White, Player::Red];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    /// Next seat in rotation.
    #[inline]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Yellow <-> White, Black <-> Red.
    #[inline]
    pub fn teammate(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Yellow and White form the team whose score is reported unflipped.
    #[inline]
    pub fn is_positive_team(self) -> bool {
        matches!(self, Player::Yellow | Player::White)
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Yellow => "Yellow",
            Player::Black => "Black",
            Player::White => "White",
            Player::Red => "Red",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(s.trim()))
    }
}

/// Candidate directions in canonical transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Right1,
    Right2,
    Left1,
    Left2,
    Up1,
    Up2,
    Down1,
    Down2,
}

impl Dir {
    #[inline]
    pub fn all() -> [Dir; 8] {
        [
            Dir::Right1,
            Dir::Right2,
            Dir::Left1,
            Dir::Left2,
            Dir::Up1,
            Dir::Up2,
            Dir::Down1,
            Dir::Down2,
        ]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row/column displacement.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Dir::Right1 => (0, 1),
            Dir::Right2 => (0, 2),
            Dir::Left1 => (0, -1),
            Dir::Left2 => (0, -2),
            Dir::Up1 => (-1, 0),
            Dir::Up2 => (-2, 0),
            Dir::Down1 => (1, 0),
            Dir::Down2 => (2, 0),
        }
    }

    #[inline]
    pub fn is_jump(self) -> bool {
        matches!(self, Dir::Right2 | Dir::Left2 | Dir::Up2 | Dir::Down2)
    }
}

/// Board indexing helpers (8x8 board)
#[inline]
pub fn idx_to_rc(idx: u8) -> (u8, u8) {
    debug_assert!((idx as usize) < CELLS);
    (idx / N, idx % N)
}

#[inline]
pub fn rc_to_idx(r: u8, c: u8) -> Option<u8> {
    if r < N && c < N {
        Some(r * N + c)
    } else {
        None
    }
}

/// Destination of a step from `idx` in `dir`, if it stays on the board.
#[inline]
pub fn step(idx: u8, dir: Dir) -> Option<u8> {
    let (r, c) = idx_to_rc(idx);
    let (dr, dc) = dir.delta();
    let nr = r as i8 + dr;
    let nc = c as i8 + dc;
    if nr < 0 || nc < 0 {
        return None;
    }
    rc_to_idx(nr as u8, nc as u8)
}

#[inline]
pub fn bit(idx: u8) -> u64 {
    1u64 << idx
}

/// Iterate set cells of a mask in ascending order.
#[inline]
pub fn cells_of(mut mask: u64) -> impl Iterator<Item = u8> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let idx = mask.trailing_zeros() as u8;
            mask &= mask - 1;
            Some(idx)
        }
    })
}
