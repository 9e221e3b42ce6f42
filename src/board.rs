use crate::error::LayoutError;
use crate::types::{step, Dir, CELLS, N};

/// Digits in a wall layout line: 8 rows of 7 vertical slots plus 7 rows of 8 horizontal slots.
pub const LAYOUT_LEN: usize = (N as usize) * (N as usize - 1) * 2;

/// Step cost marking a direction that leaves the board or crosses a wall with a jump.
pub const BLOCKED: u8 = 0;

/// Fixed wall layout of a game plus the per-direction step costs derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    // vertical[c] is the wall between c and c + 1; horizontal[c] between c and c + 8.
    vertical: [u8; CELLS],
    horizontal: [u8; CELLS],
    costs: [[u8; 8]; CELLS],
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_walls([0; CELLS], [0; CELLS])
    }
}

impl Layout {
    /// An empty board, no walls anywhere.
    #[inline]
    pub fn open() -> Self {
        Self::default()
    }

    /// Parse the 112-digit layout line.
    pub fn parse(line: &str) -> Result<Self, LayoutError> {
        let line = line.trim();
        let digits: Vec<char> = line.chars().collect();
        if digits.len() != LAYOUT_LEN {
            return Err(LayoutError::Length { expected: LAYOUT_LEN, found: digits.len() });
        }

        let mut vertical = [0u8; CELLS];
        let mut horizontal = [0u8; CELLS];
        let mut pos = 0usize;
        let next = |pos: &mut usize| -> Result<u8, LayoutError> {
            let ch = digits[*pos];
            let v = match ch {
                '0'..='2' => ch as u8 - b'0',
                _ => return Err(LayoutError::Digit { index: *pos, ch }),
            };
            *pos += 1;
            Ok(v)
        };

        for r in 0..N {
            for c in 0..N - 1 {
                vertical[(r * N + c) as usize] = next(&mut pos)?;
            }
            if r < N - 1 {
                for c in 0..N {
                    horizontal[(r * N + c) as usize] = next(&mut pos)?;
                }
            }
        }

        Ok(Self::from_walls(vertical, horizontal))
    }

    pub fn from_walls(vertical: [u8; CELLS], horizontal: [u8; CELLS]) -> Self {
        let mut layout = Self { vertical, horizontal, costs: [[BLOCKED; 8]; CELLS] };
        for idx in 0..CELLS as u8 {
            for dir in Dir::all() {
                layout.costs[idx as usize][dir.index()] = layout.compute_cost(idx, dir);
            }
        }
        layout
    }

    /// Wall count on the boundary between `idx` and its right neighbour.
    #[inline]
    pub fn vertical_wall(&self, idx: u8) -> u8 {
        self.vertical[idx as usize]
    }

    /// Wall count on the boundary between `idx` and the cell below it.
    #[inline]
    pub fn horizontal_wall(&self, idx: u8) -> u8 {
        self.horizontal[idx as usize]
    }

    /// Point cost of moving from `idx` in `dir`, or [`BLOCKED`].
    #[inline]
    pub fn cost(&self, idx: u8, dir: Dir) -> u8 {
        self.costs[idx as usize][dir.index()]
    }

    /// Cost of a move between two cells, assuming the move is structurally valid.
    /// Single steps pay for the wall they cross; jumps always cost 1.
    pub fn move_cost(&self, from: u8, to: u8) -> u8 {
        let dir = if to == from + 1 {
            Dir::Right1
        } else if from == to + 1 {
            Dir::Left1
        } else if to == from + N {
            Dir::Down1
        } else if from == to + N {
            Dir::Up1
        } else {
            return 1;
        };
        self.cost(from, dir)
    }

    fn compute_cost(&self, idx: u8, dir: Dir) -> u8 {
        if step(idx, dir).is_none() {
            return BLOCKED;
        }
        match dir {
            Dir::Right1 => 1 + self.vertical[idx as usize],
            Dir::Left1 => 1 + self.vertical[idx as usize - 1],
            Dir::Down1 => 1 + self.horizontal[idx as usize],
            Dir::Up1 => 1 + self.horizontal[(idx - N) as usize],
            Dir::Right2 => clear_jump(self.vertical[idx as usize], self.vertical[idx as usize + 1]),
            Dir::Left2 => clear_jump(self.vertical[idx as usize - 1], self.vertical[idx as usize - 2]),
            Dir::Down2 => clear_jump(self.horizontal[idx as usize], self.horizontal[(idx + N) as usize]),
            Dir::Up2 => clear_jump(
                self.horizontal[(idx - N) as usize],
                self.horizontal[(idx - 2 * N) as usize],
            ),
        }
    }
}

/// A two-cell jump may not cross any wall.
#[inline]
fn clear_jump(first: u8, second: u8) -> u8 {
    if first == 0 && second == 0 {
        1
    } else {
        BLOCKED
    }
}
