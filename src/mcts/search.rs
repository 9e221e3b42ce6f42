use std::collections::VecDeque;
use std::time::Instant;

use rand::distributions::{Distribution, WeightedIndex};
use tracing::{debug, info};

use super::arena::Arena;
use super::node::{Node, NodeId};
use super::stats::StatsPool;
use super::MctsConfig;
use crate::clock::Clock;
use crate::engine::score::score;
use crate::notation::format_action;
use crate::precompute::Tables;
use crate::rng::{rng_from_seed, GameRng};
use crate::rules::MAX_TURNS;
use crate::solver::{sorted_moves, SearchReport};
use crate::state::{Action, GameState, Move};
use crate::types::Player;

/// Simulation scores are clipped to `[-SCORE_CLIP, SCORE_CLIP]`.
pub const SCORE_CLIP: f64 = 10.0;

/// Bias per point of score gained by the move into a node.
const EXPANSION_BIAS: f64 = 0.05;

/// Base of the teammate selection weight.
const EXPANSION_WEIGHT_BASE: f64 = 16.0;

/// Clip a score to the simulation range and map it onto `[0, 1]`.
#[inline]
pub fn adapted_score(score: f64) -> f64 {
    (score.clamp(-SCORE_CLIP, SCORE_CLIP) + SCORE_CLIP) / (2.0 * SCORE_CLIP)
}

pub struct Mcts {
    config: MctsConfig,
    arena: Arena,
    pool: StatsPool,
    rng: GameRng,
    me: Player,
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Self {
        let cap = config.max_iterations as usize + 1;
        Self {
            config,
            arena: Arena::new(),
            pool: StatsPool::with_capacity(cap),
            rng: rng_from_seed(config.seed),
            me: Player::Yellow,
        }
    }

    #[inline]
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn pool(&self) -> &StatsPool {
        &self.pool
    }

    fn new_node(
        &mut self,
        tables: &Tables,
        state: &GameState,
        mv: Option<Move>,
        parent: Option<NodeId>,
        weight: f64,
        bias: f64,
    ) -> NodeId {
        let player = state.player();
        let (level, ply) = match parent {
            None => (0, 0),
            Some(p) => {
                let pn = self.arena.get(p);
                let level = if pn.player == player { pn.level } else { pn.level + 1 };
                (level, pn.ply + 1)
            }
        };

        let (stats, fresh) = self.pool.get_or_create(tables.fingerprint(state));
        let mut untried = VecDeque::new();
        let mut is_leaf = true;

        if !state.end_game() {
            if state.is_running(player) {
                if let Some(running) = state.best_running_move(tables) {
                    untried.push_back(running);
                    is_leaf = false;
                    self.pool.get_mut(stats).rave.entry(running).or_default();
                }
            } else {
                let moves = sorted_moves(state, tables);
                is_leaf = moves.is_empty();
                if fresh {
                    let rave = &mut self.pool.get_mut(stats).rave;
                    for c in &moves {
                        rave.entry(c.mv).or_default();
                    }
                }
                untried.extend(moves.iter().map(|c| c.mv));
            }
        }

        let id = self.arena.push(Node {
            level,
            ply,
            player,
            mv,
            parent,
            children: Vec::new(),
            untried,
            stats,
            weight,
            bias,
            value: 0.0,
            visits: 0,
            is_leaf,
        });
        if let Some(p) = parent {
            self.arena.get_mut(p).children.push(id);
        }
        id
    }

    /// Take the next untried move of `id`, play it on `state` and attach the child.
    fn expand(&mut self, tables: &Tables, id: NodeId, state: &mut GameState) -> Option<NodeId> {
        let node = self.arena.get_mut(id);
        let mv = node.untried.pop_front()?;
        let player = node.player;

        let before = score(state, tables, player);
        state.do_move(tables, mv);
        let delta = score(state, tables, player) - before;
        let weight = EXPANSION_WEIGHT_BASE.powf(delta);
        let bias = EXPANSION_BIAS * delta;
        Some(self.new_node(tables, state, Some(mv), Some(id), weight, bias))
    }

    fn exploration_bonus(&self, parent: &Node, child: &Node) -> f64 {
        let n = f64::from(child.visits);
        self.config.uct_k * f64::from(parent.visits).ln().sqrt() / n.sqrt() + child.bias / n
    }

    /// Blend the node's own mean with its parent's RAVE estimate for the move into it.
    fn update_value(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        let mc = self.pool.get(node.stats).mc;
        let value = match (node.parent, node.mv) {
            (Some(parent), Some(mv)) => {
                let parent_stats = self.arena.get(parent).stats;
                let rave = self.pool.get(parent_stats).rave.get(&mv).copied().unwrap_or_default();
                let m = f64::from(rave.visits);
                let n = f64::from(mc.visits);
                let b = if mc.visits >= self.config.rave_min_visits { rave.value - mc.value } else { 0.0 };
                let beta = if rave.visits == 0 { 0.0 } else { m / (m + n + 4.0 * b * b * m * n) };
                (1.0 - beta) * mc.value + beta * rave.value
            }
            _ => mc.value,
        };
        self.arena.get_mut(id).value = value;
    }

    fn select_best(&self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id);
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for &c in &node.children {
            let child = self.arena.get(c);
            let v = child.value + self.exploration_bonus(node, child);
            if v > best_value {
                best_value = v;
                best = Some(c);
            }
        }
        best
    }

    fn select_worst(&self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id);
        let mut worst = None;
        let mut worst_value = f64::INFINITY;
        for &c in &node.children {
            let child = self.arena.get(c);
            let v = child.value - self.exploration_bonus(node, child);
            if v < worst_value {
                worst_value = v;
                worst = Some(c);
            }
        }
        worst
    }

    fn select_randomly(&mut self, id: NodeId) -> Option<NodeId> {
        let children = &self.arena.get(id).children;
        let first = *children.first()?;
        let weights = children.iter().map(|&c| self.arena.get(c).weight);
        match WeightedIndex::new(weights) {
            Ok(dist) => Some(children[dist.sample(&mut self.rng)]),
            Err(_) => Some(first),
        }
    }

    /// Tree policy as seen by the searching seat: maximize for itself, sample for the
    /// teammate, minimize for opponents.
    fn select(&mut self, id: NodeId) -> Option<NodeId> {
        let player = self.arena.get(id).player;
        if player == self.me {
            self.select_best(id)
        } else if player == self.me.teammate() {
            self.select_randomly(id)
        } else {
            self.select_worst(id)
        }
    }

    /// First child with the most visits; unvisited children never qualify.
    fn most_visited(&self, id: NodeId) -> Option<NodeId> {
        let mut best = None;
        let mut max_visits = 0;
        for &c in &self.arena.get(id).children {
            let v = self.arena.get(c).visits;
            if v > max_visits {
                max_visits = v;
                best = Some(c);
            }
        }
        best
    }

    /// Along the searching seat's own line, the most visited child is also the one the
    /// tree policy would pick.
    fn is_consistent(&self, root: NodeId) -> bool {
        let mut id = root;
        loop {
            let node = self.arena.get(id);
            if node.is_leaf || node.player != self.me {
                return true;
            }
            let most = self.most_visited(id);
            if most != self.select_best(id) {
                return false;
            }
            match most {
                Some(next) => id = next,
                None => return true,
            }
        }
    }

    fn extract_action(&self, root: NodeId) -> Action {
        let mut action = Action::new();
        let mut id = root;
        loop {
            let node = self.arena.get(id);
            if node.is_leaf || node.player != self.me {
                break;
            }
            let Some(next) = self.most_visited(id) else { break };
            match self.arena.get(next).mv {
                Some(mv) if !mv.is_pass() => action.push(mv),
                _ => break,
            }
            id = next;
        }
        action
    }

    /// Default-policy playout. Returns the adapted score for the searching seat.
    fn simulate(&mut self, tables: &Tables, state: &mut GameState, max_turns: u16, trace: &mut Vec<(Player, Move)>) -> f64 {
        while state.turns() < max_turns && !state.is_running_all() {
            let player = state.player();
            let Some(mv) = state.random_move(tables, &mut self.rng) else { break };
            state.do_move(tables, mv);
            trace.push((player, mv));
        }
        adapted_score(score(state, tables, self.me))
    }

    fn backpropagate(&mut self, leaf: NodeId, value: f64, trace: &[(Player, Move)]) {
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let (stats, player, ply, parent) = {
                let n = self.arena.get(id);
                (n.stats, n.player, n.ply as usize, n.parent)
            };
            let shared = self.pool.get_mut(stats);
            shared.mc.update(value);
            for &(p, mv) in trace.iter().skip(ply) {
                if p != player || mv.is_pass() {
                    continue;
                }
                if let Some(s) = shared.rave.get_mut(&mv) {
                    s.update(value);
                }
            }
            self.arena.get_mut(id).visits += 1;
            self.update_value(id);
            cursor = parent;
        }
    }

    /// Run the search for the seat to move and return its whole turn.
    pub fn best_action(&mut self, tables: &Tables, state: &GameState, clock: &mut Clock) -> (Action, SearchReport) {
        let started = Instant::now();
        self.arena.clear();
        self.pool.clear();
        self.me = state.player();

        let root = self.new_node(tables, state, None, None, 0.0, 0.0);
        let max_turns = MAX_TURNS.min(4 * (state.turns() / 4) + self.config.horizon_turns);
        let mut trace: Vec<(Player, Move)> = Vec::with_capacity(256);

        let mut iterations = 0u32;
        loop {
            iterations += 1;
            trace.clear();
            let mut id = root;
            let mut sim = *state;

            // selection
            loop {
                let node = self.arena.get(id);
                if !node.is_fully_expanded() || node.is_leaf {
                    break;
                }
                let player = node.player;
                let Some(next) = self.select(id) else { break };
                let Some(mv) = self.arena.get(next).mv else { break };
                sim.do_move(tables, mv);
                trace.push((player, mv));
                id = next;
            }

            // expansion
            let node = self.arena.get(id);
            if node.level < self.config.max_level && !node.is_fully_expanded() {
                let player = node.player;
                if let Some(child) = self.expand(tables, id, &mut sim) {
                    if let Some(mv) = self.arena.get(child).mv {
                        trace.push((player, mv));
                    }
                    id = child;
                }
            }

            let value = self.simulate(tables, &mut sim, max_turns, &mut trace);
            self.backpropagate(id, value, &trace);

            if iterations >= self.config.min_iterations && self.is_consistent(root) {
                break;
            }
            if iterations >= self.config.max_iterations {
                break;
            }
        }

        let action = self.extract_action(root);

        let mut report = SearchReport::new("mcts");
        report.iterations = u64::from(iterations);
        report.nodes = self.arena.len() as u64;
        report.transpositions = self.pool.transpositions();
        if let Some(best) = self.most_visited(root) {
            let child = self.arena.get(best);
            report.value = child.value;
            let mc = self.pool.get(child.stats).mc;
            debug!(
                weight = child.weight,
                mc_visits = mc.visits,
                mc_value = mc.value,
                "[mcts] most visited root child"
            );
        }
        debug!(line = %self.expected_line(root), "[mcts] expected variation");

        report.elapsed_secs = started.elapsed().as_secs_f64();
        clock.charge(report.elapsed_secs);
        info!(
            iterations,
            nodes = report.nodes,
            transpositions = report.transpositions,
            secs = report.elapsed_secs,
            action = %format_action(&action),
            "[mcts] best action"
        );
        (action, report)
    }

    /// Most-visited line from the root through fully expanded nodes, for logging.
    fn expected_line(&self, root: NodeId) -> String {
        let mut parts = Vec::new();
        let mut id = root;
        loop {
            let node = self.arena.get(id);
            if !node.is_fully_expanded() || node.is_leaf {
                break;
            }
            let Some(next) = self.most_visited(id) else { break };
            if let Some(mv) = self.arena.get(next).mv {
                parts.push(mv.to_string());
            }
            id = next;
        }
        parts.join("=>")
    }
}
