use thiserror::Error;

use crate::state::Move;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("wall layout must have {expected} digits, got {found}")]
    Length { expected: usize, found: usize },
    #[error("invalid wall digit {ch:?} at position {index} (expected 0, 1 or 2)")]
    Digit { index: usize, ch: char },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move token {0:?}")]
    Move(String),
    #[error("invalid colour {0:?}")]
    Colour(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move {0:?} is not legal in this position")]
    Illegal(Move),
    #[error(transparent)]
    Notation(#[from] NotationError),
}
