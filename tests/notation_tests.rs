use wallrace::notation::{format_action, format_move, parse_action, parse_colour, parse_move};
use wallrace::{Clock, Move, NotationError, Player};

#[test]
fn cells_are_row_letter_then_column_digit() {
    assert_eq!(parse_move("a1a2").unwrap(), Move::new(0, 1));
    assert_eq!(parse_move("b1a1").unwrap(), Move::new(8, 0));
    assert_eq!(parse_move("h8g8").unwrap(), Move::new(63, 55));
    assert_eq!(Move::new(48, 40).to_string(), "g1f1");
    assert_eq!(format!("{:?}", Move::new(7, 15)), "a8b8");
}

#[test]
fn pass_and_missing_moves() {
    assert_eq!(parse_move("Nil").unwrap(), Move::PASS);
    assert_eq!(Move::PASS.to_string(), "Nil");
    assert_eq!(format_move(None), "Invalid");
    assert_eq!(format_move(Some(Move::new(0, 1))), "a1a2");
}

#[test]
fn malformed_moves_are_rejected() {
    for bad in ["", "a1", "a1a9", "i1a1", "a0a1", "A1A2", "a1a2a3", "Invalid"] {
        assert_eq!(parse_move(bad), Err(NotationError::Move(bad.to_string())), "{bad:?}");
    }
}

#[test]
fn actions_join_moves_with_colons() {
    let action = vec![Move::new(48, 40), Move::new(40, 32)];
    assert_eq!(format_action(&action), "g1f1:f1e1");
    assert_eq!(parse_action("g1f1:f1e1").unwrap(), action);
    assert_eq!(format_action(&[]), "Nil");
    assert!(parse_action("Nil").unwrap().is_empty());
    assert!(parse_action("  ").unwrap().is_empty());
    assert!(parse_action("g1f1:zz").is_err());
}

#[test]
fn colours_are_case_insensitive() {
    assert_eq!(parse_colour("Yellow").unwrap(), Player::Yellow);
    assert_eq!(parse_colour("red").unwrap(), Player::Red);
    assert_eq!(parse_colour(" WHITE\n").unwrap(), Player::White);
    assert_eq!(parse_colour("Green"), Err(NotationError::Colour("Green".to_string())));
}

#[test]
fn clock_spreads_remaining_time_over_own_turns() {
    let mut clock = Clock::default();
    assert_eq!(clock.total(), 30.0);
    assert_eq!(clock.turn_allowance(0), 30.0 / 21.0);

    clock.charge(9.0);
    assert_eq!(clock.used(), 9.0);
    assert_eq!(clock.remaining(), 21.0);
    assert_eq!(clock.turn_allowance(40), 21.0 / 11.0);
    // past the horizon the whole remainder is available
    assert_eq!(clock.turn_allowance(100), 21.0);

    clock.charge(40.0);
    assert_eq!(clock.remaining(), 0.0);
}
