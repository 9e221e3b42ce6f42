//! The closed set of move-choosing strategies.

use std::time::Instant;

use tracing::info;

use crate::clock::Clock;
use crate::mcts::{Mcts, MctsConfig};
use crate::notation::format_action;
use crate::precompute::Tables;
use crate::rng::{rng_from_seed, GameRng};
use crate::solver::{Expectiminimax, SearchLimits, SearchReport};
use crate::state::{Action, GameState};

/// Plays default-policy moves until the seat changes or a pass comes up.
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self { rng: rng_from_seed(seed) }
    }

    pub fn best_action(&mut self, tables: &Tables, state: &GameState) -> Action {
        let seat = state.player();
        let mut next = *state;
        let mut action = Action::new();
        while next.player() == seat {
            match next.random_move(tables, &mut self.rng) {
                Some(mv) if !mv.is_pass() => {
                    action.push(mv);
                    next.do_move(tables, mv);
                }
                _ => break,
            }
        }
        action
    }
}

/// Greedy running moves until the seat's pawns are home. Outside solo mode it stops at
/// the end of the seat's turn.
pub fn run_action(tables: &Tables, state: &GameState) -> Action {
    let seat = state.player();
    let mut next = *state;
    let mut action = Action::new();
    while !next.is_done(seat) && (next.is_solo() || next.player() == seat) {
        match next.best_running_move(tables) {
            Some(mv) if !mv.is_pass() => {
                action.push(mv);
                next.do_move(tables, mv);
            }
            _ => break,
        }
    }
    action
}

pub enum Strategy {
    Random(RandomStrategy),
    Run,
    Expectiminimax(Box<Expectiminimax>),
    Mcts(Box<Mcts>),
}

impl Strategy {
    pub fn random(seed: u64) -> Self {
        Strategy::Random(RandomStrategy::new(seed))
    }

    pub fn expectiminimax(limits: SearchLimits) -> Self {
        Strategy::Expectiminimax(Box::new(Expectiminimax::new(limits)))
    }

    pub fn mcts(config: MctsConfig) -> Self {
        Strategy::Mcts(Box::new(Mcts::new(config)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random(_) => "random",
            Strategy::Run => "run",
            Strategy::Expectiminimax(_) => "expectiminimax",
            Strategy::Mcts(_) => "mcts",
        }
    }

    /// Whole turn for the seat to move in `state`.
    pub fn best_action(&mut self, tables: &Tables, state: &GameState, clock: &mut Clock) -> (Action, SearchReport) {
        match self {
            Strategy::Expectiminimax(s) => s.best_action(tables, state, clock),
            Strategy::Mcts(s) => s.best_action(tables, state, clock),
            Strategy::Random(s) => timed("random", clock, || s.best_action(tables, state)),
            Strategy::Run => {
                let (action, report) = timed("run", clock, || run_action(tables, state));
                let cost: u32 = {
                    let mut next = *state;
                    action.iter().map(|&mv| u32::from(next.do_move(tables, mv))).sum()
                };
                info!(cost, secs = report.elapsed_secs, action = %format_action(&action), "[run] running moves");
                (action, report)
            }
        }
    }
}

fn timed(name: &'static str, clock: &mut Clock, f: impl FnOnce() -> Action) -> (Action, SearchReport) {
    let started = Instant::now();
    let action = f();
    let mut report = SearchReport::new(name);
    report.elapsed_secs = started.elapsed().as_secs_f64();
    clock.charge(report.elapsed_secs);
    (action, report)
}
