use std::collections::VecDeque;

use super::stats::StatsId;
use crate::state::Move;
use crate::types::Player;

pub type NodeId = u32;

#[derive(Debug, Clone)]
pub struct Node {
    /// Seat changes between the root and this node.
    pub level: u16,
    /// Moves between the root and this node.
    pub ply: u16,
    pub player: Player,
    /// Move that led here; `None` at the root.
    pub mv: Option<Move>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub untried: VecDeque<Move>,
    pub stats: StatsId,
    /// Selection weight when the teammate picks among siblings.
    pub weight: f64,
    /// Progress bonus fading with visits.
    pub bias: f64,
    /// RAVE-blended value.
    pub value: f64,
    pub visits: u32,
    pub is_leaf: bool,
}

impl Node {
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}
