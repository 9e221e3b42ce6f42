#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_possible_wrap, clippy::cast_sign_loss)] // packed u8/u16/u32 indices
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod types;
pub mod rules;
pub mod error;
pub mod board;
pub mod rng;
pub mod state;
pub mod hash;
pub mod precompute;
pub mod notation;
pub mod clock;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod solver;
pub mod mcts;
pub mod strategy;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Layout;
pub use crate::clock::Clock;
pub use crate::engine::apply::{apply_action_checked, apply_move};
pub use crate::engine::score::score;
pub use crate::error::{LayoutError, MoveError, NotationError};
pub use crate::hash::Fingerprint;
pub use crate::mcts::{Mcts, MctsConfig};
pub use crate::precompute::Tables;
pub use crate::solver::{Expectiminimax, SearchLimits, SearchReport};
pub use crate::state::{Action, Candidate, GameState, Move};
pub use crate::strategy::Strategy;
pub use crate::types::Player;
