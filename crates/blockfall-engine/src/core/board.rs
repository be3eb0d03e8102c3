use serde::{Deserialize, Serialize};

use crate::core::piece::Piece;

pub(crate) const BOARD_WIDTH: usize = 10;
pub(crate) const BOARD_HEIGHT: usize = 20;

// All playable cells of a row set at once.
const FULL_ROW_MASK: u16 = (1 << BOARD_WIDTH) - 1;

/// Occupancy grid for the playfield.
///
/// Each row is a 16-bit mask where bit `x` marks the cell in column `x` as
/// occupied (bit 0 is the leftmost column). Which piece produced a cell is a
/// presentation concern of the host renderer; the core only tracks occupancy.
///
/// The board is only mutated through [`fill_piece`](Self::fill_piece) and
/// [`clear_lines`](Self::clear_lines); its dimensions are fixed.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left playable cell
/// - X increases rightward, Y increases downward
/// - Piece positions are signed: cells above row 0 are outside the visible
///   board and exempt from collision, cells past any other edge collide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [u16; BOARD_HEIGHT],
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [0; BOARD_HEIGHT],
    };

    /// Checks if the cell at the given playable coordinates is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> x) & 1 != 0
    }

    /// Number of occupied cells in the given row.
    #[inline]
    #[must_use]
    pub fn occupied_cells_in_row(&self, y: usize) -> u32 {
        self.rows[y].count_ones()
    }

    /// Checks if the piece overlaps an occupied cell or leaves the board.
    ///
    /// Any occupied piece cell at column `< 0`, column `>= WIDTH`, or row
    /// `>= HEIGHT` collides regardless of board contents. Cells at row `< 0`
    /// never collide: a piece may overhang the top of the board while it is
    /// still entering the playfield.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.occupied_cells().any(|(x, y)| {
            if y < 0 {
                return false;
            }
            if x < 0 || x >= Self::WIDTH as i16 || y >= Self::HEIGHT as i16 {
                return true;
            }
            self.is_cell_occupied(x as usize, y as usize)
        })
    }

    /// Locks a piece onto the board by setting its occupied cells.
    ///
    /// Rows above the board are skipped, consistent with the collision
    /// policy. Callers that need the pre-merge board must clone first.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            if (0..Self::WIDTH as i16).contains(&x) && (0..Self::HEIGHT as i16).contains(&y) {
                self.rows[y as usize] |= 1 << x;
            }
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Scans bottom to top; every full row is removed and an empty row is
    /// inserted at the top, preserving the relative order of the survivors.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y] == FULL_ROW_MASK {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(0);
        count
    }

    /// Height of each column: distance from the topmost occupied cell to the
    /// floor, 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> [u8; Self::WIDTH] {
        let mut heights = [0u8; Self::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            if let Some(y) = (0..Self::HEIGHT).find(|&y| self.is_cell_occupied(x, y)) {
                *height = (Self::HEIGHT - y) as u8;
            }
        }
        heights
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// `'#'` is an occupied cell, `'.'` an empty one. Rows are listed top to
    /// bottom, anchored at the top of the board.
    ///
    /// # Panics
    ///
    /// Panics if a row does not contain exactly 10 cells or more than 20
    /// rows are given.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= Self::HEIGHT,
            "expected at most {} rows, got {}",
            Self::HEIGHT,
            lines.len()
        );

        for (y, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                Self::WIDTH,
                "each row must have exactly {} cells, got {} at row {}",
                Self::WIDTH,
                cells.len(),
                y
            );
            for (x, &cell) in cells.iter().enumerate() {
                if cell == '#' {
                    board.rows[y] |= 1 << x;
                }
            }
        }
        board
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Emitted as a 20x10 grid of 0/1 cell values.
        let grid: Vec<Vec<u8>> = (0..Self::HEIGHT)
            .map(|y| {
                (0..Self::WIDTH)
                    .map(|x| u8::from(self.is_cell_occupied(x, y)))
                    .collect()
            })
            .collect();
        grid.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Accepts the host's grid of numeric cell values; any nonzero value
        // counts as occupied (the value itself is the host's color index).
        let grid = Vec::<Vec<u8>>::deserialize(deserializer)?;
        if grid.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} rows, got {}",
                BOARD_HEIGHT,
                grid.len()
            )));
        }

        let mut board = Self::EMPTY;
        for (y, row) in grid.iter().enumerate() {
            if row.len() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {} cells at row {y}, got {}",
                    BOARD_WIDTH,
                    row.len()
                )));
            }
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    board.rows[y] |= 1 << x;
                }
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::{PieceKind, PiecePosition};

    fn piece_at(kind: PieceKind, x: i16, y: i16) -> Piece {
        Piece::new(kind.spawn_matrix(), PiecePosition { x, y })
    }

    #[test]
    fn test_empty_board_has_no_occupied_cells() {
        let board = Board::EMPTY;
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                assert!(!board.is_cell_occupied(x, y), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_collision_at_side_and_bottom_edges() {
        // Boundary collisions must not depend on board contents.
        let board = Board::EMPTY;

        let test_cases = vec![
            ("past left edge", piece_at(PieceKind::O, -1, 0), true),
            ("past right edge", piece_at(PieceKind::O, 9, 0), true),
            ("past bottom edge", piece_at(PieceKind::O, 4, 19), true),
            ("at left edge", piece_at(PieceKind::O, 0, 0), false),
            ("at right edge", piece_at(PieceKind::O, 8, 0), false),
            ("resting on floor", piece_at(PieceKind::O, 4, 18), false),
        ];

        for (name, piece, expected) in test_cases {
            assert_eq!(board.collides(&piece), expected, "{name}");
        }
    }

    #[test]
    fn test_cells_above_the_board_do_not_collide() {
        let board = Board::EMPTY;

        // Vertical I overhanging the top: three cells at y = -3..0, one at y = 0.
        let vertical_i = Piece::new(PieceKind::I.spawn_matrix().rotated_cw(), PiecePosition {
            x: 0,
            y: -3,
        });
        assert!(!board.collides(&vertical_i));

        // Fully above the board never collides either.
        let above = piece_at(PieceKind::O, 4, -5);
        assert!(!board.collides(&above));
    }

    #[test]
    fn test_collision_with_occupied_cells() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ....##....
            ....##....
            ",
        );

        assert!(board.collides(&piece_at(PieceKind::O, 4, 18)));
        assert!(!board.collides(&piece_at(PieceKind::O, 4, 16)));
        assert!(!board.collides(&piece_at(PieceKind::O, 2, 18)));
    }

    #[test]
    fn test_fill_piece_sets_occupied_cells() {
        let mut board = Board::EMPTY;
        board.fill_piece(&piece_at(PieceKind::O, 4, 18));

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(board.is_cell_occupied(x, y), "cell ({x}, {y})");
        }
        assert_eq!(
            (0..Board::HEIGHT)
                .map(|y| board.occupied_cells_in_row(y))
                .sum::<u32>(),
            4
        );
    }

    #[test]
    fn test_clear_single_line_shifts_rows_down() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..#.......
            ##########
            #.#.......
            ",
        );

        let cleared = board.clear_lines();
        assert_eq!(cleared, 1);

        let expected = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..#.......
            #.#.......
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_multiple_non_adjacent_lines() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ##########
            #.........
            ##########
            .#........
            ",
        );

        assert_eq!(board.clear_lines(), 2);

        let expected = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            .#........
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_with_partial_rows_clears_nothing() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #########.
            ",
        );

        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_heights() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            ##........
            ###.......
            ####......
            #####.....
            ",
        );

        let heights = board.column_heights();
        assert_eq!(heights, [5, 4, 3, 2, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_column_heights_ignore_holes() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            ..........
            #.........
            ",
        );

        assert_eq!(board.column_heights()[0], 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .#........
            ..#.......
            ##########
            ",
        );

        let serialized = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_deserialize_accepts_host_color_indices() {
        // The host encodes piece type in the cell value; any nonzero value
        // must read back as occupied.
        let mut grid = vec![vec![0u8; Board::WIDTH]; Board::HEIGHT];
        grid[19] = vec![1, 2, 3, 4, 5, 6, 7, 0, 0, 0];
        let json = serde_json::to_string(&grid).unwrap();

        let board: Board = serde_json::from_str(&json).unwrap();
        for x in 0..7 {
            assert!(board.is_cell_occupied(x, 19));
        }
        for x in 7..10 {
            assert!(!board.is_cell_occupied(x, 19));
        }
    }

    #[test]
    fn test_deserialize_rejects_wrong_dimensions() {
        let short = vec![vec![0u8; Board::WIDTH]; Board::HEIGHT - 1];
        let json = serde_json::to_string(&short).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());

        let mut ragged = vec![vec![0u8; Board::WIDTH]; Board::HEIGHT];
        ragged[3] = vec![0u8; Board::WIDTH - 1];
        let json = serde_json::to_string(&ragged).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }
}
