mod common;

use common::{mask_of, open_tables, skip_turns, walled_tables};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use wallrace::rules::{goal_mask, start_mask, MAX_TURNS, TURN_BUDGET};
use wallrace::state::{MAX_DELTA, MIN_DELTA};
use wallrace::{apply_action_checked, apply_move, GameState, Move, MoveError, Player};

#[test]
fn start_position() {
    let s = GameState::new();
    assert_eq!(s.player(), Player::Yellow);
    assert_eq!(s.remaining(), TURN_BUDGET);
    assert_eq!(s.turns(), 0);
    for p in Player::ALL {
        assert_eq!(s.mask(p), start_mask(p));
        assert_eq!(s.spent(p), 0);
        assert!(!s.is_done(p));
    }
    assert_eq!(s.filled().count_ones(), 16);
    assert!(!s.end_game());
}

#[test]
fn no_pass_with_full_budget() {
    let tables = walled_tables();
    let s = GameState::new();
    let moves = s.legal_moves(tables);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|c| !c.mv.is_pass()));
    assert!(moves.iter().all(|c| (MIN_DELTA..=MAX_DELTA).contains(&c.delta)));
}

#[test]
fn legal_moves_respect_budget_and_occupancy() {
    let tables = walled_tables();
    let mut s = GameState::new();
    // spend part of the budget so that passing becomes legal
    let two = s
        .legal_moves(tables)
        .into_iter()
        .find(|c| tables.move_cost(c.mv) == 2)
        .map(|c| c.mv);
    let first = s.legal_moves(tables)[0].mv;
    let spent = s.do_move(tables, two.unwrap_or(first));
    assert_eq!(s.player(), Player::Yellow);
    assert_eq!(s.remaining(), TURN_BUDGET - spent);

    let moves = s.legal_moves(tables);
    assert_eq!(moves.last().map(|c| c.mv), Some(Move::PASS));
    for c in moves.iter().filter(|c| !c.mv.is_pass()) {
        assert!(tables.move_cost(c.mv) <= s.remaining());
        assert!(s.is_empty(c.mv.dest()));
        assert_ne!(s.mask(Player::Yellow) & (1u64 << c.mv.source()), 0);
    }
}

#[test]
fn foreign_pawn_enables_jump() {
    let tables = open_tables();
    // Yellow at 40, Black at 41: 40 -> 42 is legal only while 41 is occupied
    let masks = [
        mask_of(&[40, 56, 57, 58]),
        mask_of(&[41, 0, 1, 2]),
        mask_of(&[62, 63, 61, 60]),
        mask_of(&[5, 6, 7, 4]),
    ];
    let s = GameState::from_masks(Player::Yellow, masks);
    assert!(s.is_legal(tables, Move::new(40, 42)));

    let mut masks_without = masks;
    masks_without[1] = mask_of(&[16, 0, 1, 2]);
    let s = GameState::from_masks(Player::Yellow, masks_without);
    assert!(!s.is_legal(tables, Move::new(40, 42)));
}

#[test]
fn budget_exhaustion_rotates_seat() {
    let tables = open_tables();
    let mut s = GameState::new();
    let mut spent = 0;
    while s.player() == Player::Yellow {
        let mv = s.legal_moves(tables)[0].mv;
        assert!(!mv.is_pass());
        spent += s.do_move(tables, mv);
    }
    assert_eq!(spent, TURN_BUDGET);
    assert_eq!(s.player(), Player::Black);
    assert_eq!(s.turns(), 1);
    assert_eq!(s.remaining(), TURN_BUDGET);
    assert_eq!(s.spent(Player::Yellow), TURN_BUDGET);
}

#[test]
fn early_end_of_turn_charges_leftover_budget() {
    let tables = open_tables();
    let mut s = GameState::new();
    let mv = s.legal_moves(tables)[0].mv;
    let cost = tables.move_cost(mv);
    s.do_action(tables, &[mv]);
    assert_eq!(s.player(), Player::Black);
    assert_eq!(cost, 1);
    assert_eq!(s.spent(Player::Yellow), TURN_BUDGET);

    let mut passed = GameState::new();
    passed.do_move(tables, mv);
    passed.do_move(tables, Move::PASS);
    assert_eq!(passed, s);
}

#[test]
fn finished_team_may_only_pass() {
    let tables = walled_tables();
    let masks = [49_344u64, 13_889_101_250_810_609_664, 68_719_477_016, 217_017_207_043_915_776];
    let s = GameState::from_masks(Player::Red, masks);
    assert!(s.is_done(Player::Red));
    assert!(s.is_done(Player::Black));
    let moves = s.legal_moves(tables);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].mv, Move::PASS);

    let mut next = s;
    next.do_move(tables, Move::PASS);
    assert_eq!(next.player(), Player::Yellow);
    // a finished team is not charged for its unused budget
    assert_eq!(next.spent(Player::Red), 0);
}

#[test]
fn finished_seat_moves_its_partner() {
    let tables = open_tables();
    let masks = [
        goal_mask(Player::Yellow),
        mask_of(&[0, 1, 8, 9]),
        mask_of(&[54, 55, 62, 63]),
        mask_of(&[48, 49, 56, 57]),
    ];
    let s = GameState::from_masks(Player::Yellow, masks);
    assert!(s.is_done(Player::Yellow));
    assert_eq!(s.driven(), Some(Player::White));
    let moves = s.legal_moves(tables);
    assert!(moves.iter().filter(|c| !c.mv.is_pass()).all(|c| s.mask(Player::White) & (1u64 << c.mv.source()) != 0));

    let mv = moves[0].mv;
    let mut next = s;
    let cost = next.do_move(tables, mv);
    assert_ne!(next.mask(Player::White), s.mask(Player::White));
    assert_eq!(next.mask(Player::Yellow), s.mask(Player::Yellow));
    assert_eq!(next.spent(Player::Yellow), cost);
    assert_eq!(next.spent(Player::White), 0);
}

#[test]
fn game_ends_at_turn_limit() {
    let tables = open_tables();
    let mut s = GameState::new();
    skip_turns(&mut s, tables, MAX_TURNS - 1);
    assert!(!s.end_game());
    skip_turns(&mut s, tables, 1);
    assert!(s.end_game());
    assert_eq!(s.player(), Player::Yellow);
}

#[test]
fn solo_mode_never_rotates() {
    let tables = walled_tables();
    let mut s = GameState::new();
    s.enable_solo_mode(Player::Black);
    assert!(s.is_solo());
    assert_eq!(s.player(), Player::Black);
    assert_eq!(s.filled(), start_mask(Player::Black));
    for _ in 0..6 {
        let Some(mv) = s.best_running_move(tables) else { break };
        s.do_move(tables, mv);
        assert_eq!(s.player(), Player::Black);
        assert_eq!(s.remaining(), TURN_BUDGET);
    }
    assert!(s.spent(Player::Black) >= 6);
}

#[test]
fn running_needs_turn_threshold_and_clear_rectangle() {
    let tables = open_tables();
    // Yellow between its pawns and corner 7 has rows 0..=3, columns 6..=7 to itself
    let masks = [
        mask_of(&[22, 23, 30, 31]),
        mask_of(&[32, 33, 40, 41]),
        mask_of(&[48, 49, 56, 57]),
        mask_of(&[50, 51, 58, 59]),
    ];
    let mut s = GameState::from_masks(Player::Yellow, masks);
    assert!(!s.is_running(Player::Yellow));
    skip_turns(&mut s, tables, 24);
    assert!(s.is_running(Player::Yellow));

    let mut blocked = masks;
    blocked[1] = mask_of(&[15, 33, 40, 41]);
    let mut s = GameState::from_masks(Player::Yellow, blocked);
    skip_turns(&mut s, tables, 24);
    assert!(!s.is_running(Player::Yellow));
}

#[test]
fn best_running_move_has_maximal_delta() {
    let tables = walled_tables();
    let s = GameState::new();
    let moves = s.legal_moves(tables);
    let best = s.best_running_move(tables).unwrap();
    let max = moves.iter().map(|c| c.delta).max().unwrap();
    let first_max = moves.iter().find(|c| c.delta == max).unwrap();
    assert_eq!(best, first_max.mv);
}

#[test]
fn random_games_keep_invariants() {
    let tables = walled_tables();
    let mut rng = Pcg64::seed_from_u64(2024);
    for _ in 0..5 {
        let mut s = GameState::new();
        while !s.end_game() {
            let Some(mv) = s.random_move(tables, &mut rng) else { break };
            assert!(s.is_legal(tables, mv), "{mv} not legal");
            s.do_move(tables, mv);

            let masks = s.masks();
            let union = masks.iter().fold(0u64, |acc, m| acc | m);
            assert_eq!(union, s.filled());
            assert_eq!(masks.iter().map(|m| m.count_ones()).sum::<u32>(), 16);
            assert!(s.remaining() >= 1 && s.remaining() <= TURN_BUDGET);
        }
        assert!(s.end_game());
    }
}

#[test]
fn random_move_is_reproducible() {
    let tables = walled_tables();
    let s = GameState::new();
    let a: Vec<_> = {
        let mut rng = Pcg64::seed_from_u64(9);
        (0..20).map(|_| s.random_move(tables, &mut rng)).collect()
    };
    let b: Vec<_> = {
        let mut rng = Pcg64::seed_from_u64(9);
        (0..20).map(|_| s.random_move(tables, &mut rng)).collect()
    };
    assert_eq!(a, b);
}

#[test]
fn checked_application_rejects_illegal_moves() {
    let tables = walled_tables();
    let s = GameState::new();
    // occupied destination
    let bad = Move::new(48, 49);
    assert_eq!(apply_move(&s, tables, bad), Err(MoveError::Illegal(bad)));
    // pass with the full budget
    assert_eq!(apply_move(&s, tables, Move::PASS), Err(MoveError::Illegal(Move::PASS)));

    let mv = s.legal_moves(tables)[0].mv;
    let next = apply_action_checked(&s, tables, &[mv]).unwrap();
    assert_eq!(next.player(), Player::Black);

    // the empty action just ends the turn
    let skipped = apply_action_checked(&s, tables, &[]).unwrap();
    assert_eq!(skipped.player(), Player::Black);
    assert_eq!(skipped.spent(Player::Yellow), TURN_BUDGET);
}

#[test]
fn checked_action_stops_at_seat_change() {
    let tables = open_tables();
    let s = GameState::new();
    let mut probe = s;
    let mut action = Vec::new();
    while probe.player() == Player::Yellow {
        let mv = probe.legal_moves(tables)[0].mv;
        action.push(mv);
        probe.do_move(tables, mv);
    }
    let extra = probe.legal_moves(tables)[0].mv;
    action.push(extra);
    assert_eq!(apply_action_checked(&s, tables, &action), Err(MoveError::Illegal(extra)));
}

#[test]
fn solo_mode_restores_the_full_budget() {
    let tables = open_tables();
    let mut s = GameState::new();
    let mv = s.legal_moves(tables)[0].mv;
    s.do_move(tables, mv);
    assert_eq!(s.remaining(), TURN_BUDGET - 1);

    s.enable_solo_mode(Player::Yellow);
    assert_eq!(s.remaining(), TURN_BUDGET);
    assert_eq!(s.masks(), [s.mask(Player::Yellow), 0, 0, 0]);
}
