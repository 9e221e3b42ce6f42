use crate::error::MoveError;
use crate::precompute::Tables;
use crate::rules::TURN_BUDGET;
use crate::state::{GameState, Move};
use crate::types::{bit, Player};

impl GameState {
    /// Apply a move in place without validation. Returns the points it cost.
    ///
    /// Pass ends the turn. Any other move slides one pawn of the driven seat and charges
    /// its cost to the seat to move; once the budget hits zero the turn rotates.
    pub fn do_move(&mut self, tables: &Tables, mv: Move) -> u8 {
        if mv.is_pass() {
            self.next_player();
            return 0;
        }

        let owner = self.driven().unwrap_or(self.player);
        let flip = bit(mv.source()) ^ bit(mv.dest());
        self.masks[owner.index()] ^= flip;
        self.filled ^= flip;

        let cost = tables.move_cost(mv);
        let seat = self.player.index();
        self.spent[seat] = self.spent[seat].saturating_add(cost);

        if !self.solo {
            self.remaining = self.remaining.saturating_sub(cost);
            if self.remaining == 0 {
                self.next_player();
            }
        }
        cost
    }

    /// Apply a whole action; the turn ends afterwards even if budget is left over.
    pub fn do_action(&mut self, tables: &Tables, action: &[Move]) {
        let seat = self.player;
        for &mv in action {
            self.do_move(tables, mv);
        }
        if self.player == seat {
            self.next_player();
        }
    }

    /// Close the turn. Unused budget still counts as spent unless the team is home.
    pub(crate) fn next_player(&mut self) {
        if !self.is_team_done(self.player) {
            let seat = self.player.index();
            self.spent[seat] = self.spent[seat].saturating_add(self.remaining);
        }
        self.player = self.player.next();
        self.turns += 1;
        self.remaining = TURN_BUDGET;
    }

    /// Drop every other seat's pawns and freeze the rotation on `player`.
    pub fn enable_solo_mode(&mut self, player: Player) {
        let own = self.masks[player.index()];
        self.masks = [0; 4];
        self.masks[player.index()] = own;
        self.filled = own;
        self.player = player;
        self.remaining = TURN_BUDGET;
        self.solo = true;
    }
}

/// Validated, pure single-move transition.
pub fn apply_move(state: &GameState, tables: &Tables, mv: Move) -> Result<GameState, MoveError> {
    if !state.is_legal(tables, mv) {
        return Err(MoveError::Illegal(mv));
    }
    let mut ns = *state;
    ns.do_move(tables, mv);
    Ok(ns)
}

/// Validated, pure whole-turn transition. Every move must be legal at the point it is
/// played and belong to the seat that started the turn.
pub fn apply_action_checked(state: &GameState, tables: &Tables, action: &[Move]) -> Result<GameState, MoveError> {
    let seat = state.player();
    let mut ns = *state;
    for &mv in action {
        if ns.player() != seat {
            return Err(MoveError::Illegal(mv));
        }
        ns = apply_move(&ns, tables, mv)?;
    }
    if ns.player() == seat {
        ns.next_player();
    }
    Ok(ns)
}
