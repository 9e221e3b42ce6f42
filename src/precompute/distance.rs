use std::collections::VecDeque;

use crate::precompute::index::{config_index, CONFIGS};
use crate::precompute::transitions::TransitionTable;
use crate::rules::goal_mask;
use crate::types::Player;

/// Distance of a configuration the relaxation never reached.
pub const UNREACHED: u8 = u8::MAX;

/// Minimum point cost from every configuration to each player's goal, ignoring opponents.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    rows: Vec<[u8; 4]>,
}

impl DistanceTable {
    pub fn build(transitions: &TransitionTable) -> Self {
        let mut table = Self { rows: vec![[UNREACHED; 4]; CONFIGS] };
        for p in Player::ALL {
            table.relax(transitions, p);
        }
        table
    }

    /// FIFO relaxation seeded at the goal. Edge costs are tiny and transitions are
    /// symmetric, so distances from the goal equal distances to it. Jumps that need a
    /// foreign pawn in the middle are skipped.
    fn relax(&mut self, transitions: &TransitionTable, player: Player) {
        let p = player.index();
        let goal = goal_mask(player);
        let mut queue = VecDeque::with_capacity(1 << 16);

        self.rows[config_index(goal)][p] = 0;
        queue.push_back(goal);

        while let Some(top) = queue.pop_front() {
            let d_top = self.rows[config_index(top)][p];
            for t in transitions.row(top) {
                if t.needs_middle {
                    continue;
                }
                let proposed = d_top.saturating_add(t.cost);
                let next = t.apply(top);
                let slot = &mut self.rows[config_index(next)][p];
                if *slot > proposed {
                    *slot = proposed;
                    queue.push_back(next);
                }
            }
        }
    }

    #[inline]
    pub fn get(&self, player: Player, mask: u64) -> u8 {
        self.rows[config_index(mask)][player.index()]
    }

    /// Configurations a player's relaxation never reached.
    pub fn unreached(&self, player: Player) -> usize {
        self.rows.iter().filter(|r| r[player.index()] == UNREACHED).count()
    }
}
