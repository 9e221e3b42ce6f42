//! Fixed game constants. None of these are configurable.

use crate::types::Player;

/// Move points available at the start of every turn.
pub const TURN_BUDGET: u8 = 3;

/// The game ends once this many turns have been played.
pub const MAX_TURNS: u16 = 80;

/// Earliest turn at which a seat may switch to the forced running endgame.
pub const RUNNING_MIN_TURNS: u16 = 24;

/// Pawns per player.
pub const PAWNS: u32 = 4;

/// Start masks indexed by seat.
pub const STARTS: [u64; 4] = [
    1 << 48 | 1 << 49 | 1 << 56 | 1 << 57,
    1 << 0 | 1 << 1 | 1 << 8 | 1 << 9,
    1 << 54 | 1 << 55 | 1 << 62 | 1 << 63,
    1 << 6 | 1 << 7 | 1 << 14 | 1 << 15,
];

/// Goal masks: every seat races to the start block of the seat three places on.
pub const GOALS: [u64; 4] = [STARTS[3], STARTS[2], STARTS[1], STARTS[0]];

/// Outermost goal cell for each seat; the running-endgame rectangle is anchored there.
pub const GOAL_CORNERS: [u8; 4] = [7, 63, 0, 56];

#[inline]
pub const fn start_mask(p: Player) -> u64 {
    STARTS[p as usize]
}

#[inline]
pub const fn goal_mask(p: Player) -> u64 {
    GOALS[p as usize]
}

#[inline]
pub const fn goal_corner(p: Player) -> u8 {
    GOAL_CORNERS[p as usize]
}
