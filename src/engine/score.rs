use crate::precompute::Tables;
use crate::state::GameState;
use crate::types::Player;

/// Weight of one point of mobility in the static evaluation.
pub const MOBILITY_WEIGHT: f64 = 0.06;

impl GameState {
    /// Remaining goal distance of a seat. Seats without pawns (solo mode) count as home.
    #[inline]
    pub fn goal_distance(&self, tables: &Tables, p: Player) -> u8 {
        match self.mask(p) {
            0 => 0,
            mask => tables.distance(p, mask),
        }
    }

    /// Points already spent plus points still needed.
    #[inline]
    pub fn estimated_moves(&self, tables: &Tables, p: Player) -> f64 {
        f64::from(self.spent(p)) + f64::from(self.goal_distance(tables, p))
    }

    /// Sum of positive distance decreases over the seat's own single moves that are
    /// legal on the real board, ignoring budget.
    pub fn mobility(&self, tables: &Tables, p: Player) -> f64 {
        let mask = self.mask(p);
        if mask == 0 {
            return 0.0;
        }
        let here = tables.distance(p, mask);
        let mut gain = 0u32;
        for t in tables.row(mask) {
            if !self.is_empty(t.to) || (t.needs_middle && self.is_empty(t.middle())) {
                continue;
            }
            let there = tables.distance(p, t.apply(mask));
            if there < here {
                gain += u32::from(here - there);
            }
        }
        f64::from(gain)
    }

    pub fn evaluate_player(&self, tables: &Tables, p: Player) -> f64 {
        -self.estimated_moves(tables, p) + MOBILITY_WEIGHT * self.mobility(tables, p)
    }

    /// Static evaluation from `p`'s perspective.
    pub fn evaluate(&self, tables: &Tables, p: Player) -> f64 {
        perspective(p, |q| self.evaluate_player(tables, q))
    }
}

/// Terminal score from `p`'s perspective: the opposing team's estimated total minus
/// its own. Zero-sum between the two teams.
pub fn score(state: &GameState, tables: &Tables, p: Player) -> f64 {
    perspective(p, |q| -state.estimated_moves(tables, q))
}

/// Yellow+White total minus Black+Red total of `term`, flipped for the Black/Red team.
#[inline]
fn perspective(p: Player, term: impl Fn(Player) -> f64) -> f64 {
    let mut v = 0.0;
    for q in Player::ALL {
        if q.is_positive_team() {
            v += term(q);
        } else {
            v -= term(q);
        }
    }
    if p.is_positive_team() {
        v
    } else {
        -v
    }
}
