use crate::precompute::Tables;
use crate::state::{GameState, Move, MoveList};

/// Deterministic move ordering:
/// - TT best move first (if provided and present)
/// - Then by progress delta, best first
/// - Generation order within equal deltas
#[inline]
pub fn order_moves(moves: &mut MoveList, tt_best: Option<Move>) {
    // slice sort is stable
    moves.sort_by(|a, b| b.delta.cmp(&a.delta));

    if let Some(best) = tt_best {
        if let Some(pos) = moves.iter().position(|c| c.mv == best) {
            moves[..=pos].rotate_right(1);
        }
    }
}

/// Legal moves bucketed by delta, best bucket first.
pub fn sorted_moves(state: &GameState, tables: &Tables) -> MoveList {
    let mut moves = state.legal_moves(tables);
    order_moves(&mut moves, None);
    moves
}
