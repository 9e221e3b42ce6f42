#![allow(dead_code)]

use std::sync::OnceLock;

use wallrace::{GameState, Layout, Tables};

/// Layout shared with the wall tests: single and double walls, no jumps along row 0.
pub const TEST_LAYOUT: &str = concat!(
    "01000000100000200001010012110001100000100100001010000000000100011010100010",
    "01000010000000000000100000101011001010"
);

pub fn open_tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables::build(Layout::open()))
}

pub fn walled_tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables::build(Layout::parse(TEST_LAYOUT).expect("test layout parses")))
}

/// Close `n` turns without moving.
pub fn skip_turns(state: &mut GameState, tables: &Tables, n: u16) {
    for _ in 0..n {
        state.do_action(tables, &[]);
    }
}

pub fn mask_of(cells: &[u8]) -> u64 {
    cells.iter().fold(0u64, |m, &c| m | 1u64 << c)
}
