mod common;

use common::{mask_of, open_tables, skip_turns, walled_tables};
use wallrace::mcts::adapted_score;
use wallrace::{apply_action_checked, Clock, GameState, Mcts, MctsConfig, Player};

fn small_config(seed: u64) -> MctsConfig {
    MctsConfig { min_iterations: 200, max_iterations: 400, horizon_turns: 8, seed, ..MctsConfig::default() }
}

#[test]
fn adapted_score_is_clipped_and_scaled() {
    assert_eq!(adapted_score(0.0), 0.5);
    assert_eq!(adapted_score(10.0), 1.0);
    assert_eq!(adapted_score(-10.0), 0.0);
    assert_eq!(adapted_score(55.0), 1.0);
    assert_eq!(adapted_score(-3.5), 0.325);
}

#[test]
fn action_is_legal_and_iterations_stay_in_bounds() {
    let tables = walled_tables();
    let s = GameState::new();
    let mut mcts = Mcts::new(small_config(1));
    let mut clock = Clock::default();
    let (action, report) = mcts.best_action(tables, &s, &mut clock);

    assert!(!action.is_empty());
    let next = apply_action_checked(&s, tables, &action).expect("action validates");
    assert_eq!(next.player(), Player::Black);
    assert!((200..=400).contains(&report.iterations), "{}", report.iterations);
    assert!(report.nodes > 1);
    assert_eq!(report.nodes as usize, mcts.arena().len());
    assert!((0.0..=1.0).contains(&report.value));
    assert!(clock.used() > 0.0);
}

#[test]
fn same_seed_same_action() {
    let tables = walled_tables();
    let mut s = GameState::new();
    skip_turns(&mut s, tables, 2);
    let run = |seed| {
        let mut mcts = Mcts::new(small_config(seed));
        mcts.best_action(tables, &s, &mut Clock::default())
    };
    let (a, ra) = run(3);
    let (b, rb) = run(3);
    assert_eq!(a, b);
    assert_eq!(ra.iterations, rb.iterations);
    assert_eq!(ra.nodes, rb.nodes);
}

#[test]
fn running_root_plays_the_greedy_move() {
    let tables = open_tables();
    let masks = [
        mask_of(&[22, 23, 30, 31]),
        mask_of(&[32, 33, 40, 41]),
        mask_of(&[48, 49, 56, 57]),
        mask_of(&[50, 51, 58, 59]),
    ];
    let mut s = GameState::from_masks(Player::Yellow, masks);
    skip_turns(&mut s, tables, 24);
    assert!(s.is_running(Player::Yellow));

    let mut mcts = Mcts::new(small_config(9));
    let (action, _) = mcts.best_action(tables, &s, &mut Clock::default());
    assert_eq!(action.first().copied(), s.best_running_move(tables));
}

#[test]
fn transpositions_share_statistics() {
    let tables = walled_tables();
    let s = GameState::new();
    let mut mcts = Mcts::new(small_config(5));
    mcts.best_action(tables, &s, &mut Clock::default());
    // moving two pawns in either order reaches the same node twice
    assert!(mcts.pool().transpositions() > 0);
    assert!(mcts.pool().len() < mcts.arena().len());
}

#[test]
fn finished_game_yields_empty_action() {
    let tables = walled_tables();
    let mut s = GameState::new();
    skip_turns(&mut s, tables, 80);
    let mut mcts = Mcts::new(MctsConfig { min_iterations: 5, max_iterations: 10, ..MctsConfig::default() });
    let (action, report) = mcts.best_action(tables, &s, &mut Clock::default());
    assert!(action.is_empty());
    assert!(report.iterations <= 10);
}
