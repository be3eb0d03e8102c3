use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::board::BOARD_WIDTH;

/// Enum representing the type of piece.
///
/// The catalog is fixed at exactly 7 tetromino shapes. Piece type only
/// selects the spawn matrix (and the host's render color); once a piece is
/// in play the core works with its occupancy matrix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in catalog order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the shape matrix of this kind in spawn orientation.
    #[must_use]
    pub fn spawn_matrix(self) -> ShapeMatrix {
        let (rows, width) = PIECE_SHAPES[self as usize];
        ShapeMatrix::from_bit_rows(rows, width)
    }
}

/// Spawn-orientation shapes as bitmask rows (bit 0 = leftmost column).
const PIECE_SHAPES: [(&[u8], usize); PieceKind::LEN] = [
    (&[0b1111], 4),       // I
    (&[0b11, 0b11], 2),   // O
    (&[0b010, 0b111], 3), // T
    (&[0b110, 0b011], 3), // S
    (&[0b011, 0b110], 3), // Z
    (&[0b001, 0b111], 3), // J
    (&[0b100, 0b111], 3), // L
];

/// Tight rectangular cell matrix of a piece.
///
/// Rows are stored as bitmasks (bit 0 = leftmost column). Rotation swaps the
/// dimensions: rotating an `R x C` matrix yields a `C x R` matrix, and four
/// clockwise rotations return the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatrix {
    rows: ArrayVec<u8, 4>,
    width: u8,
}

impl ShapeMatrix {
    pub(crate) fn from_bit_rows(bit_rows: &[u8], width: usize) -> Self {
        let mut rows = ArrayVec::new();
        rows.try_extend_from_slice(bit_rows)
            .expect("piece shapes have at most 4 rows");
        Self {
            rows,
            width: width as u8,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Checks if the cell at the given matrix coordinates is occupied.
    #[must_use]
    pub fn is_cell_occupied(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> x) & 1 != 0
    }

    /// Returns the matrix rotated 90 degrees clockwise.
    ///
    /// Cell `(r, c)` of an `R x C` matrix maps to cell `(c, R - 1 - r)` of
    /// the `C x R` result.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let height = self.rows.len();
        let mut rows = ArrayVec::new();
        for _ in 0..self.width() {
            rows.push(0u8);
        }
        for (r, &bits) in self.rows.iter().enumerate() {
            for (c, row) in rows.iter_mut().enumerate() {
                if (bits >> c) & 1 != 0 {
                    *row |= 1 << (height - 1 - r);
                }
            }
        }
        Self {
            rows,
            width: height as u8,
        }
    }

    /// Iterates over the occupied cells as `(dx, dy)` offsets from the
    /// matrix's top-left corner.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        self.rows.iter().enumerate().flat_map(move |(dy, &bits)| {
            (0..width).filter_map(move |dx| ((bits >> dx) & 1 != 0).then_some((dx, dy)))
        })
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let grid: Vec<Vec<u8>> = (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| u8::from(self.is_cell_occupied(x, y)))
                    .collect()
            })
            .collect();
        grid.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShapeMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Accepts the host's numeric cell matrices; nonzero cells are
        // occupied, the value itself is the host's color index.
        let grid = Vec::<Vec<u8>>::deserialize(deserializer)?;
        if grid.is_empty() || grid.len() > 4 {
            return Err(serde::de::Error::custom(format!(
                "piece matrix must have 1 to 4 rows, got {}",
                grid.len()
            )));
        }
        let width = grid[0].len();
        if width == 0 || width > 4 {
            return Err(serde::de::Error::custom(format!(
                "piece matrix must have 1 to 4 columns, got {width}"
            )));
        }

        let mut rows = ArrayVec::new();
        for (y, row) in grid.iter().enumerate() {
            if row.len() != width {
                return Err(serde::de::Error::custom(format!(
                    "piece matrix rows must have uniform width; row {y} has {}",
                    row.len()
                )));
            }
            let mut bits = 0u8;
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    bits |= 1 << x;
                }
            }
            rows.push(bits);
        }
        Ok(Self {
            rows,
            width: width as u8,
        })
    }
}

/// Position of a piece's top-left matrix corner in board coordinates.
///
/// Coordinates are signed: pieces may overhang the top of the board (`y < 0`)
/// while entering the playfield, and collision checks must be able to report
/// positions past any edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecePosition {
    pub x: i16,
    pub y: i16,
}

/// A piece in play: its occupancy matrix plus a board position.
///
/// Pieces are immutable; movement and rotation return new instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    matrix: ShapeMatrix,
    #[serde(rename = "pos")]
    position: PiecePosition,
}

impl Piece {
    #[must_use]
    pub fn new(matrix: ShapeMatrix, position: PiecePosition) -> Self {
        Self { matrix, position }
    }

    /// Creates a piece of the given kind at its spawn position.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self::from_matrix_at_spawn(kind.spawn_matrix())
    }

    /// Places an arbitrary matrix at the spawn position for its width:
    /// column `floor(W / 2) - floor(width / 2)`, row 0.
    #[must_use]
    pub fn from_matrix_at_spawn(matrix: ShapeMatrix) -> Self {
        let x = (BOARD_WIDTH / 2 - matrix.width() / 2) as i16;
        Self {
            matrix,
            position: PiecePosition { x, y: 0 },
        }
    }

    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            matrix: self.matrix.rotated_cw(),
            position: self.position,
        }
    }

    #[must_use]
    pub fn shifted(&self, dx: i16) -> Self {
        Self {
            matrix: self.matrix.clone(),
            position: PiecePosition {
                x: self.position.x + dx,
                y: self.position.y,
            },
        }
    }

    #[must_use]
    pub fn lowered(&self) -> Self {
        Self {
            matrix: self.matrix.clone(),
            position: PiecePosition {
                x: self.position.x,
                y: self.position.y + 1,
            },
        }
    }

    #[must_use]
    pub fn with_column(&self, x: i16) -> Self {
        Self {
            matrix: self.matrix.clone(),
            position: PiecePosition {
                x,
                y: self.position.y,
            },
        }
    }

    /// Iterates over the occupied cells in board coordinates.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.matrix
            .occupied_offsets()
            .map(move |(dx, dy)| (self.position.x + dx as i16, self.position.y + dy as i16))
    }
}
