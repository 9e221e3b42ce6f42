use crate::board::{Layout, BLOCKED};
use crate::precompute::index::{all_configs, config_index, CONFIGS};
use crate::state::Move;
use crate::types::{bit, cells_of, step, Dir};

/// Upper bound on a single row: four pawns, eight directions each.
pub const MAX_ROW: usize = 32;

/// A structural move of one pawn inside a configuration, ignoring other players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: u8,
    pub to: u8,
    pub cost: u8,
    /// Jump whose middle cell is empty within the configuration: legal only when some
    /// other pawn sits there on the real board.
    pub needs_middle: bool,
}

impl Transition {
    #[inline]
    pub fn middle(&self) -> u8 {
        (self.from + self.to) >> 1
    }

    /// Configuration after taking this transition.
    #[inline]
    pub fn apply(&self, mask: u64) -> u64 {
        mask ^ bit(self.from) ^ bit(self.to)
    }

    #[inline]
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

/// Candidate transitions of one configuration: occupied cells ascending, then the
/// eight directions in canonical order.
pub fn transitions_for(layout: &Layout, mask: u64, out: &mut Vec<Transition>) {
    let empty = |cell: u8| mask & bit(cell) == 0;
    for from in cells_of(mask) {
        for dir in Dir::all() {
            let cost = layout.cost(from, dir);
            if cost == BLOCKED {
                continue;
            }
            let Some(to) = step(from, dir) else { continue };
            if !empty(to) {
                continue;
            }
            let needs_middle = dir.is_jump() && empty((from + to) >> 1);
            out.push(Transition { from, to, cost, needs_middle });
        }
    }
}

/// All rows in one flat buffer; row `i` is `entries[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: Vec<Transition>,
    offsets: Vec<u32>,
}

impl TransitionTable {
    pub fn build(layout: &Layout) -> Self {
        let mut entries = Vec::with_capacity(CONFIGS * 24);
        let mut offsets = Vec::with_capacity(CONFIGS + 1);
        offsets.push(0u32);
        for (i, mask) in all_configs().enumerate() {
            debug_assert_eq!(config_index(mask), i);
            transitions_for(layout, mask, &mut entries);
            offsets.push(entries.len() as u32);
        }
        entries.shrink_to_fit();
        Self { entries, offsets }
    }

    #[inline]
    pub fn row_at(&self, index: usize) -> &[Transition] {
        let lo = self.offsets[index] as usize;
        let hi = self.offsets[index + 1] as usize;
        &self.entries[lo..hi]
    }

    #[inline]
    pub fn row(&self, mask: u64) -> &[Transition] {
        self.row_at(config_index(mask))
    }

    /// Total number of stored transitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Approximate heap footprint.
    pub fn approx_bytes(&self) -> usize {
        self.entries.len() * std::mem::size_of::<Transition>()
            + self.offsets.len() * std::mem::size_of::<u32>()
    }
}
