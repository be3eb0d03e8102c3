use std::cell::OnceCell;

use blockfall_engine::Board;

/// Lazily computed structural metrics of a board.
///
/// Each metric is evaluated on first access and cached, so scoring paths
/// that skip a term never pay for it.
#[derive(Debug)]
pub struct BoardMetrics {
    board: Board,
    column_heights: OnceCell<[u8; Board::WIDTH]>,
    aggregate_height: OnceCell<u32>,
    max_height: OnceCell<u8>,
    height_variance: OnceCell<f32>,
    num_holes: OnceCell<u32>,
    blocked_holes: OnceCell<u32>,
    bumpiness: OnceCell<u32>,
    well_depth: OnceCell<u32>,
    near_full_rows: OnceCell<u32>,
}

impl BoardMetrics {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            column_heights: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            max_height: OnceCell::new(),
            height_variance: OnceCell::new(),
            num_holes: OnceCell::new(),
            blocked_holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
            well_depth: OnceCell::new(),
            near_full_rows: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &[u8; Board::WIDTH] {
        self.column_heights.get_or_init(|| self.board.column_heights())
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        *self
            .aggregate_height
            .get_or_init(|| self.column_heights().iter().copied().map(u32::from).sum())
    }

    #[must_use]
    pub fn max_height(&self) -> u8 {
        *self
            .max_height
            .get_or_init(|| *self.column_heights().iter().max().unwrap())
    }

    /// Population variance of the column heights about their mean.
    #[must_use]
    pub fn height_variance(&self) -> f32 {
        *self.height_variance.get_or_init(|| {
            let heights = self.column_heights();
            let mean = self.aggregate_height() as f32 / Board::WIDTH as f32;
            heights
                .iter()
                .map(|&h| (f32::from(h) - mean).powi(2))
                .sum::<f32>()
                / Board::WIDTH as f32
        })
    }

    /// Empty cells below their column's top.
    #[must_use]
    pub fn num_holes(&self) -> u32 {
        *self.num_holes.get_or_init(|| {
            let mut holes = 0;
            for (x, &height) in self.column_heights().iter().enumerate() {
                for y in (Board::HEIGHT - height as usize)..Board::HEIGHT {
                    if !self.board.is_cell_occupied(x, y) {
                        holes += 1;
                    }
                }
            }
            holes
        })
    }

    /// Holes additionally walled in on both sides: the cells to the left and
    /// right (both must exist) are occupied. Edge columns therefore never
    /// contribute.
    #[must_use]
    pub fn blocked_holes(&self) -> u32 {
        *self.blocked_holes.get_or_init(|| {
            let mut blocked = 0;
            for (x, &height) in self.column_heights().iter().enumerate() {
                if x == 0 || x == Board::WIDTH - 1 {
                    continue;
                }
                for y in (Board::HEIGHT - height as usize)..Board::HEIGHT {
                    if !self.board.is_cell_occupied(x, y)
                        && self.board.is_cell_occupied(x - 1, y)
                        && self.board.is_cell_occupied(x + 1, y)
                    {
                        blocked += 1;
                    }
                }
            }
            blocked
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| (i32::from(w[0]) - i32::from(w[1])).unsigned_abs())
                .sum()
        })
    }

    /// Total depth of wells: columns strictly lower than both neighbors,
    /// measured to the shallower neighbor. Edge columns compare against an
    /// effectively infinite outer neighbor.
    #[must_use]
    pub fn well_depth(&self) -> u32 {
        *self.well_depth.get_or_init(|| {
            let heights = self.column_heights();
            let mut depth = 0;
            for (x, &h) in heights.iter().enumerate() {
                let left = if x == 0 { u8::MAX } else { heights[x - 1] };
                let right = if x == Board::WIDTH - 1 {
                    u8::MAX
                } else {
                    heights[x + 1]
                };
                if h < left && h < right {
                    depth += u32::from(u8::min(left, right) - h);
                }
            }
            depth
        })
    }

    /// Near-full-row reward units: each row with at most 2 empty cells
    /// contributes `2 - empty_count`.
    #[must_use]
    pub fn near_full_rows(&self) -> u32 {
        *self.near_full_rows.get_or_init(|| {
            (0..Board::HEIGHT)
                .map(|y| {
                    let empty = Board::WIDTH as u32 - self.board.occupied_cells_in_row(y);
                    if empty <= 2 { 2 - empty } else { 0 }
                })
                .sum()
        })
    }
}
