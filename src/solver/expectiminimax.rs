//! Three-actor alpha-beta. The searching seat maximizes, opponents minimize and the
//! teammate is modelled as a chance node that averages its replies weighted by
//! `10^delta`.

use std::time::Instant;

use tracing::{debug, info};

use super::move_order::order_moves;
use super::tt::{Bound, TTEntry, TranspositionTable};
use super::tt_array::FixedTT;
use super::{SearchLimits, SearchReport};
use crate::clock::Clock;
use crate::engine::score::score;
use crate::notation::format_action;
use crate::precompute::Tables;
use crate::state::{Action, GameState, Move};
use crate::types::Player;

/// Weight of a teammate reply at an averaging node.
#[inline]
pub fn chance_weight(delta: i8) -> f64 {
    10f64.powi(i32::from(delta))
}

#[inline]
fn next_depth(state: &GameState, next: &GameState, depth: u8) -> u8 {
    if next.player() == state.player() {
        depth
    } else {
        depth - 1
    }
}

pub struct Expectiminimax<T: TranspositionTable = FixedTT> {
    limits: SearchLimits,
    tt: T,
    me: Player,
    nodes: u64,
    cutoffs: u64,
    can_abort: bool,
    aborted: bool,
}

impl Default for Expectiminimax<FixedTT> {
    fn default() -> Self {
        Self::new(SearchLimits::default())
    }
}

impl Expectiminimax<FixedTT> {
    pub fn new(limits: SearchLimits) -> Self {
        Self::with_table(limits, FixedTT::default())
    }
}

impl<T: TranspositionTable> Expectiminimax<T> {
    pub fn with_table(limits: SearchLimits, tt: T) -> Self {
        Self { limits, tt, me: Player::Yellow, nodes: 0, cutoffs: 0, can_abort: false, aborted: false }
    }

    #[inline]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    #[inline]
    pub fn table(&self) -> &T {
        &self.tt
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    fn reset_counters(&mut self) {
        self.nodes = 0;
        self.cutoffs = 0;
        self.aborted = false;
    }

    /// One fixed-depth search from `state` for the seat to move, with fresh counters.
    /// `can_abort` arms the node limit. The table is kept.
    pub fn search_root(
        &mut self,
        tables: &Tables,
        state: &GameState,
        depth: u8,
        can_abort: bool,
    ) -> (f64, Option<Move>) {
        self.me = state.player();
        self.can_abort = can_abort;
        self.reset_counters();
        self.search(tables, state, f64::NEG_INFINITY, f64::INFINITY, depth)
    }

    /// Like [`search_root`](Self::search_root) inside the window `[alpha, beta]`, with
    /// the node limit armed. The value is clamped to the window: `alpha` stands for a
    /// fail low, `beta` for a fail high.
    pub fn search_window(
        &mut self,
        tables: &Tables,
        state: &GameState,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> (f64, Option<Move>) {
        self.me = state.player();
        self.can_abort = true;
        self.reset_counters();
        let (value, best) = self.search(tables, state, alpha, beta, depth);
        (value.max(alpha).min(beta), best)
    }

    /// Value from the searching seat's perspective plus the best move at this node.
    /// Leaves report `PASS`; a node without legal moves reports `None`.
    fn search(&mut self, tables: &Tables, state: &GameState, alpha: f64, beta: f64, depth: u8) -> (f64, Option<Move>) {
        if self.can_abort && self.nodes >= self.limits.max_nodes {
            self.aborted = true;
            return (0.0, None);
        }

        if state.end_game() {
            self.nodes += 1;
            return (score(state, tables, self.me), Some(Move::PASS));
        }
        if depth == 0 {
            self.nodes += 1;
            return (state.evaluate(tables, self.me), Some(Move::PASS));
        }

        let fp = tables.fingerprint(state);
        let (mut alpha, mut beta) = (alpha, beta);
        let entry = self.tt.get(fp);
        if let Some(e) = entry.filter(|e| e.depth == depth) {
            match e.flag {
                Bound::Exact => {
                    self.nodes += 1;
                    return (e.value, e.best_move);
                }
                Bound::Lower if e.value >= beta => {
                    self.nodes += 1;
                    return (e.value, e.best_move);
                }
                Bound::Lower => alpha = alpha.max(e.value),
                Bound::Upper if e.value <= alpha => {
                    self.nodes += 1;
                    return (e.value, e.best_move);
                }
                Bound::Upper => beta = beta.min(e.value),
            }
        }
        let pv = entry.and_then(|e| e.best_move);

        let mover = state.player();
        let result = if mover == self.me {
            self.max_node(tables, state, alpha, beta, depth, pv)
        } else if mover == self.me.teammate() {
            self.average_node(tables, state, alpha, beta, depth)
        } else {
            self.min_node(tables, state, alpha, beta, depth, pv)
        };

        match result {
            Some((value, best_move)) => {
                if !self.aborted {
                    let flag = Bound::classify(value, alpha, beta);
                    self.tt.put(fp, TTEntry { lock: fp.lock, depth, flag, value, best_move });
                }
                (value, best_move)
            }
            None if self.aborted => (0.0, None),
            None => (score(state, tables, self.me), None),
        }
    }

    fn max_node(
        &mut self,
        tables: &Tables,
        state: &GameState,
        alpha: f64,
        beta: f64,
        depth: u8,
        pv: Option<Move>,
    ) -> Option<(f64, Option<Move>)> {
        let mut moves = state.legal_moves(tables);
        if moves.is_empty() {
            return None;
        }
        order_moves(&mut moves, pv);

        let mut best_value = f64::NEG_INFINITY;
        let mut best_move = None;
        let mut local_alpha = alpha;
        for c in &moves {
            if best_value >= beta {
                self.cutoffs += 1;
                break;
            }
            let mut next = *state;
            next.do_move(tables, c.mv);
            let (value, _) = self.search(tables, &next, local_alpha, beta, next_depth(state, &next, depth));
            if self.aborted {
                return None;
            }
            if value > best_value {
                best_value = value;
                best_move = Some(c.mv);
            }
            local_alpha = local_alpha.max(value);
        }
        Some((best_value, best_move))
    }

    fn min_node(
        &mut self,
        tables: &Tables,
        state: &GameState,
        alpha: f64,
        beta: f64,
        depth: u8,
        pv: Option<Move>,
    ) -> Option<(f64, Option<Move>)> {
        let mut moves = state.legal_moves(tables);
        if moves.is_empty() {
            return None;
        }
        order_moves(&mut moves, pv);

        let mut worst_value = f64::INFINITY;
        let mut worst_move = None;
        let mut local_beta = beta;
        for c in &moves {
            if worst_value <= alpha {
                self.cutoffs += 1;
                break;
            }
            let mut next = *state;
            next.do_move(tables, c.mv);
            let (value, _) = self.search(tables, &next, alpha, local_beta, next_depth(state, &next, depth));
            if self.aborted {
                return None;
            }
            if value < worst_value {
                worst_value = value;
                worst_move = Some(c.mv);
            }
            local_beta = local_beta.min(value);
        }
        Some((worst_value, worst_move))
    }

    fn average_node(
        &mut self,
        tables: &Tables,
        state: &GameState,
        alpha: f64,
        beta: f64,
        depth: u8,
    ) -> Option<(f64, Option<Move>)> {
        let moves = state.legal_moves(tables);
        if moves.is_empty() {
            return None;
        }

        let mut sum_values = 0.0;
        let mut sum_weights = 0.0;
        for c in &moves {
            let mut next = *state;
            next.do_move(tables, c.mv);
            let (value, _) = self.search(tables, &next, alpha, beta, next_depth(state, &next, depth));
            if self.aborted {
                return None;
            }
            let weight = chance_weight(c.delta);
            sum_values += weight * value;
            sum_weights += weight;
        }
        Some((sum_values / sum_weights, None))
    }

    /// Iterative deepening under the clock's per-turn allowance, then the whole turn's
    /// action is rebuilt move by move at the deepest completed depth.
    pub fn best_action(&mut self, tables: &Tables, state: &GameState, clock: &mut Clock) -> (Action, SearchReport) {
        let started = Instant::now();
        let max_turn_time = clock.turn_allowance(state.turns());
        self.me = state.player();
        self.tt.clear();

        let mut report = SearchReport::new("expectiminimax");
        let mut last_total = 0.0;
        let mut total = 0.0;
        let mut depth = self.limits.start_depth;
        let mut completed = None;
        let mut aborted = false;

        while depth <= self.limits.max_depth {
            let can_abort = depth > self.limits.min_depth;
            let t = Instant::now();
            let (value, _) = self.search_root(tables, state, depth, can_abort);
            let dt = t.elapsed().as_secs_f64();
            total += dt;
            report.nodes += self.nodes;
            report.cutoffs += self.cutoffs;
            report.iterations += 1;
            debug!(depth, value, nodes = self.nodes, cutoffs = self.cutoffs, dt, total, "[expectiminimax] iteration");

            if self.aborted {
                info!(depth, nodes = self.nodes, "[expectiminimax] aborted");
                aborted = true;
                break;
            }
            report.value = value;
            completed = Some(depth);

            if depth >= self.limits.min_depth {
                let branching = if last_total > 0.0 { total / last_total } else { self.limits.default_branching };
                if branching * total >= max_turn_time {
                    break;
                }
            }
            last_total = total;
            match depth.checked_add(1) {
                Some(d) => depth = d,
                None => break,
            }
        }
        // nothing completed: rebuild at the first depth without the node limit
        let depth = completed.unwrap_or(self.limits.start_depth);
        report.depth = depth;
        report.aborted = aborted;

        let mut action = Action::new();
        let mut next = *state;
        while next.player() == self.me {
            let (_, best) = self.search_root(tables, &next, depth, false);
            report.nodes += self.nodes;
            report.cutoffs += self.cutoffs;
            match best {
                Some(mv) if !mv.is_pass() => {
                    action.push(mv);
                    next.do_move(tables, mv);
                }
                _ => break,
            }
        }

        report.transpositions = self.tt.len() as u64;
        report.elapsed_secs = started.elapsed().as_secs_f64();
        clock.charge(report.elapsed_secs);
        info!(
            value = report.value,
            depth = report.depth,
            nodes = report.nodes,
            secs = report.elapsed_secs,
            action = %format_action(&action),
            "[expectiminimax] best action"
        );
        (action, report)
    }
}
