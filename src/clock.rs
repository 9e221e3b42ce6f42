/// Whole-game thinking time in seconds.
pub const DEFAULT_TOTAL_SECS: f64 = 30.0;

/// Turns of our own still assumed to come, counted from the start of the game.
const HORIZON_OWN_TURNS: u16 = 21;

/// Time bookkeeping for one seat over a whole game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    total_secs: f64,
    used_secs: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SECS)
    }
}

impl Clock {
    pub fn new(total_secs: f64) -> Self {
        Self { total_secs, used_secs: 0.0 }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.total_secs
    }

    #[inline]
    pub fn used(&self) -> f64 {
        self.used_secs
    }

    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.total_secs - self.used_secs).max(0.0)
    }

    #[inline]
    pub fn charge(&mut self, secs: f64) {
        self.used_secs += secs;
    }

    /// Share of the remaining time for the current turn. Every seat moves once per
    /// four turns, so `turns / 4` own turns are behind us.
    pub fn turn_allowance(&self, turns: u16) -> f64 {
        let left = HORIZON_OWN_TURNS.saturating_sub(turns / 4).max(1);
        (self.total_secs - self.used_secs) / f64::from(left)
    }
}
