use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use smallvec::SmallVec;

use crate::precompute::Tables;
use crate::rules::{goal_corner, goal_mask, start_mask, MAX_TURNS, RUNNING_MIN_TURNS, TURN_BUDGET};
use crate::types::{bit, cells_of, idx_to_rc, Player, N};

/// A (source, destination) pair packed as `source | destination << 6`, or the pass sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u16);

impl Move {
    /// Give up the rest of the turn's budget.
    pub const PASS: Move = Move(u16::MAX);

    #[inline]
    pub const fn new(source: u8, dest: u8) -> Self {
        Move((source as u16 & 0x3f) | ((dest as u16 & 0x3f) << 6))
    }

    #[inline]
    pub fn source(self) -> u8 {
        (self.0 & 0x3f) as u8
    }

    #[inline]
    pub fn dest(self) -> u8 {
        ((self.0 >> 6) & 0x3f) as u8
    }

    #[inline]
    pub fn is_pass(self) -> bool {
        self == Self::PASS
    }
}

/// Moves of one turn, in order.
pub type Action = Vec<Move>;

/// Progress-delta range used for move bucketing.
pub const MIN_DELTA: i8 = -6;
pub const MAX_DELTA: i8 = 1;

/// Number of delta buckets.
pub const DELTA_BUCKETS: usize = (MAX_DELTA - MIN_DELTA + 1) as usize;

/// A legal move together with its progress delta: goal-distance gained minus points paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    pub delta: i8,
}

pub type MoveList = SmallVec<[Candidate; 64]>;

#[inline]
fn clamp_delta(v: i16) -> i8 {
    v.clamp(MIN_DELTA as i16, MAX_DELTA as i16) as i8
}

/// Sampling weight of the default policy: each point of delta is worth a factor of 16.
#[inline]
pub fn policy_weight(delta: i8) -> f64 {
    16f64.powi(i32::from(delta))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) player: Player,
    pub(crate) remaining: u8,
    pub(crate) masks: [u64; 4],
    pub(crate) filled: u64,
    pub(crate) spent: [u8; 4],
    pub(crate) turns: u16,
    pub(crate) solo: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Start-of-game position, Yellow to move.
    pub fn new() -> Self {
        let masks = Player::ALL.map(start_mask);
        Self::from_masks(Player::Yellow, masks)
    }

    /// Arbitrary position with fresh counters.
    pub fn from_masks(player: Player, masks: [u64; 4]) -> Self {
        Self {
            player,
            remaining: TURN_BUDGET,
            masks,
            filled: masks.iter().fold(0, |acc, m| acc | m),
            spent: [0; 4],
            turns: 0,
            solo: false,
        }
    }

    /// Only `player`'s pawns on the board; moves never rotate seats.
    pub fn solo(player: Player, mask: u64) -> Self {
        let mut masks = [0u64; 4];
        masks[player.index()] = mask;
        let mut s = Self::from_masks(player, masks);
        s.solo = true;
        s
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn teammate(&self) -> Player {
        self.player.teammate()
    }

    /// Points left this turn.
    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    #[inline]
    pub fn mask(&self, p: Player) -> u64 {
        self.masks[p.index()]
    }

    #[inline]
    pub fn masks(&self) -> [u64; 4] {
        self.masks
    }

    #[inline]
    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Points charged to a seat so far.
    #[inline]
    pub fn spent(&self, p: Player) -> u8 {
        self.spent[p.index()]
    }

    #[inline]
    pub fn turns(&self) -> u16 {
        self.turns
    }

    #[inline]
    pub fn is_solo(&self) -> bool {
        self.solo
    }

    #[inline]
    pub fn is_empty(&self, cell: u8) -> bool {
        self.filled & bit(cell) == 0
    }

    #[inline]
    pub fn is_done(&self, p: Player) -> bool {
        self.masks[p.index()] == goal_mask(p)
    }

    #[inline]
    pub fn is_team_done(&self, p: Player) -> bool {
        self.is_done(p) && self.is_done(p.teammate())
    }

    /// Seat whose pawns the current player moves: itself, or its partner once it has
    /// finished. `None` when the whole team is home, or when a solo seat has arrived.
    #[inline]
    pub fn driven(&self) -> Option<Player> {
        if !self.is_done(self.player) {
            Some(self.player)
        } else if !self.solo && !self.is_done(self.teammate()) {
            Some(self.teammate())
        } else {
            None
        }
    }

    /// Passing needs a partly spent budget, or a finished team.
    #[inline]
    pub fn can_pass(&self) -> bool {
        self.remaining < TURN_BUDGET || self.is_team_done(self.player)
    }

    pub fn end_game(&self) -> bool {
        self.turns >= MAX_TURNS || Player::ALL.iter().all(|&p| self.is_done(p))
    }

    /// Legal moves of the seat to move, pass last when allowed.
    pub fn legal_moves(&self, tables: &Tables) -> MoveList {
        let mut out = MoveList::new();

        if let Some(driven) = self.driven() {
            let mask = self.masks[driven.index()];
            let actual = i16::from(tables.distance(driven, mask));
            for t in tables.row(mask) {
                if t.cost > self.remaining {
                    continue;
                }
                if !self.is_empty(t.to) {
                    continue;
                }
                if t.needs_middle && self.is_empty(t.middle()) {
                    continue;
                }
                let after = i16::from(tables.distance(driven, t.apply(mask)));
                out.push(Candidate {
                    mv: t.as_move(),
                    delta: clamp_delta(actual - after - i16::from(t.cost)),
                });
            }
        }

        if self.can_pass() {
            out.push(Candidate { mv: Move::PASS, delta: clamp_delta(-i16::from(self.remaining)) });
        }

        out
    }

    #[inline]
    pub fn is_legal(&self, tables: &Tables, mv: Move) -> bool {
        self.legal_moves(tables).iter().any(|c| c.mv == mv)
    }

    /// A seat is running once no foreign pawn sits inside the rectangle spanned by its
    /// pawns and its goal corner. A finished seat is judged by its partner's pawns.
    pub fn is_running(&self, p: Player) -> bool {
        if self.turns < RUNNING_MIN_TURNS {
            return false;
        }

        let runner = if self.is_done(p) { p.teammate() } else { p };
        let own = self.masks[runner.index()];
        let (cr, cc) = idx_to_rc(goal_corner(runner));
        let (mut min_r, mut max_r, mut min_c, mut max_c) = (cr, cr, cc, cc);
        for cell in cells_of(own) {
            let (r, c) = idx_to_rc(cell);
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_c = min_c.min(c);
            max_c = max_c.max(c);
        }

        let mut rect = 0u64;
        for r in min_r..=max_r {
            for c in min_c..=max_c {
                rect |= bit(r * N + c);
            }
        }
        self.filled & rect & !own == 0
    }

    /// Every seat is running; nothing left to decide.
    pub fn is_running_all(&self) -> bool {
        Player::ALL.iter().all(|&p| self.is_running(p))
    }

    /// Move with the largest progress delta (first wins on ties).
    pub fn best_running_move(&self, tables: &Tables) -> Option<Move> {
        let mut best: Option<Candidate> = None;
        for c in self.legal_moves(tables) {
            if best.map_or(true, |b| c.delta > b.delta) {
                best = Some(c);
            }
        }
        best.map(|c| c.mv)
    }

    /// Default policy: sample a legal move with weight `16^delta`.
    pub fn random_move<R: Rng + ?Sized>(&self, tables: &Tables, rng: &mut R) -> Option<Move> {
        let moves = self.legal_moves(tables);
        match moves.len() {
            0 => None,
            1 => Some(moves[0].mv),
            _ => {
                let dist = WeightedIndex::new(moves.iter().map(|c| policy_weight(c.delta))).ok()?;
                Some(moves[dist.sample(rng)].mv)
            }
        }
    }
}
