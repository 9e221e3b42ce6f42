//! Text form of moves and actions as exchanged with the referee.
//!
//! A move is two cells, each a row letter `a`..`h` (top row first) followed by a column
//! digit `1`..`8`. Pass is `Nil`, a missing move is `Invalid`, and an action joins
//! its moves with `:`.

use std::fmt;

use crate::error::NotationError;
use crate::state::{Action, Move};
use crate::types::{idx_to_rc, rc_to_idx, Player};

pub const PASS_TOKEN: &str = "Nil";
pub const INVALID_TOKEN: &str = "Invalid";
pub const ACTION_SEPARATOR: char = ':';

fn write_cell(f: &mut fmt::Formatter<'_>, cell: u8) -> fmt::Result {
    let (r, c) = idx_to_rc(cell);
    write!(f, "{}{}", char::from(b'a' + r), c + 1)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return f.write_str(PASS_TOKEN);
        }
        write_cell(f, self.source())?;
        write_cell(f, self.dest())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// `Invalid` stands in for "no move".
pub fn format_move(mv: Option<Move>) -> String {
    mv.map_or_else(|| INVALID_TOKEN.to_string(), |m| m.to_string())
}

fn parse_cell(row: u8, col: u8) -> Option<u8> {
    if !(b'a'..=b'h').contains(&row) || !(b'1'..=b'8').contains(&col) {
        return None;
    }
    rc_to_idx(row - b'a', col - b'1')
}

pub fn parse_move(token: &str) -> Result<Move, NotationError> {
    let token = token.trim();
    if token == PASS_TOKEN {
        return Ok(Move::PASS);
    }
    let err = || NotationError::Move(token.to_string());
    let b = token.as_bytes();
    if b.len() != 4 {
        return Err(err());
    }
    let source = parse_cell(b[0], b[1]).ok_or_else(err)?;
    let dest = parse_cell(b[2], b[3]).ok_or_else(err)?;
    Ok(Move::new(source, dest))
}

/// Colon-joined moves; an empty action is `Nil`.
pub fn format_action(action: &[Move]) -> String {
    if action.is_empty() {
        return PASS_TOKEN.to_string();
    }
    action.iter().map(ToString::to_string).collect::<Vec<_>>().join(":")
}

/// Inverse of [`format_action`]. A lone `Nil` is the empty action.
pub fn parse_action(text: &str) -> Result<Action, NotationError> {
    let text = text.trim();
    if text.is_empty() || text == PASS_TOKEN {
        return Ok(Action::new());
    }
    text.split(ACTION_SEPARATOR).map(parse_move).collect()
}

pub fn parse_colour(text: &str) -> Result<Player, NotationError> {
    Player::parse(text).ok_or_else(|| NotationError::Colour(text.trim().to_string()))
}
