mod common;

use common::{open_tables, walled_tables};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use wallrace::state::{MAX_DELTA, MIN_DELTA};
use wallrace::{score, GameState, Move, Player};

#[test]
fn open_start_is_balanced() {
    let tables = open_tables();
    let s = GameState::new();
    for p in Player::ALL {
        assert_eq!(score(&s, tables, p), 0.0);
        assert!(s.evaluate(tables, p).abs() < 1e-9, "{p:?}");
    }
}

#[test]
fn score_is_zero_sum_between_teams() {
    let tables = walled_tables();
    let mut rng = Pcg64::seed_from_u64(11);
    let mut s = GameState::new();
    for _ in 0..120 {
        let Some(mv) = s.random_move(tables, &mut rng) else { break };
        s.do_move(tables, mv);

        let y = score(&s, tables, Player::Yellow);
        assert_eq!(y, score(&s, tables, Player::White));
        assert_eq!(y, -score(&s, tables, Player::Black));
        assert_eq!(y, -score(&s, tables, Player::Red));

        let e = s.evaluate(tables, Player::Yellow);
        assert!((e + s.evaluate(tables, Player::Red)).abs() < 1e-9);
    }
}

#[test]
fn move_delta_matches_score_change() {
    let tables = walled_tables();
    let mut rng = Pcg64::seed_from_u64(5);
    let mut s = GameState::new();
    let mut checked = 0;
    for _ in 0..200 {
        let me = s.player();
        let before = score(&s, tables, me);
        for c in s.legal_moves(tables) {
            if c.mv.is_pass() || c.delta == MIN_DELTA || c.delta == MAX_DELTA {
                continue;
            }
            let mut next = s;
            next.do_move(tables, c.mv);
            let gained = score(&next, tables, me) - before;
            assert_eq!(gained, f64::from(c.delta), "{}", c.mv);
            checked += 1;
        }
        let Some(mv) = s.random_move(tables, &mut rng) else { break };
        s.do_move(tables, mv);
    }
    assert!(checked > 100);
}

#[test]
fn pass_forfeits_the_rest_of_the_budget() {
    let tables = open_tables();
    let mut s = GameState::new();
    let mv = s.legal_moves(tables)[0].mv;
    s.do_move(tables, mv);
    let left = s.remaining();
    let pass = s.legal_moves(tables).into_iter().find(|c| c.mv.is_pass()).unwrap();
    assert_eq!(pass.delta, -(left as i8));

    let before = score(&s, tables, Player::Yellow);
    let mut next = s;
    next.do_move(tables, Move::PASS);
    assert_eq!(score(&next, tables, Player::Yellow) - before, -f64::from(left));
}

#[test]
fn solo_seats_without_pawns_count_as_home() {
    let tables = open_tables();
    let mut s = GameState::new();
    s.enable_solo_mode(Player::Yellow);
    assert_eq!(s.goal_distance(tables, Player::Black), 0);
    assert_eq!(s.mobility(tables, Player::Black), 0.0);
    assert!(s.goal_distance(tables, Player::Yellow) > 0);
    assert!(s.mobility(tables, Player::Yellow) > 0.0);
}
