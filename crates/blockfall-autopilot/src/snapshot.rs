use blockfall_engine::{Board, GameField, Piece, PieceKind, ShapeMatrix};
use serde::{Deserialize, Serialize};

/// Contract violation in a [`GameSnapshot`].
///
/// Raised only for malformed input shapes; in-domain impossibilities (no
/// reachable placement, nothing to hold) are handled by the policy's
/// fallback rules and never surface as errors.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("piece matrix has no occupied cells")]
    EmptyPieceMatrix,
    #[display("piece matrix ({width}x{height}) exceeds the board dimensions")]
    OversizedPieceMatrix { width: usize, height: usize },
}

/// Immutable view of the game the autopilot decides against.
///
/// Mirrors the state object the host assembles each frame: board, current
/// piece, upcoming pieces, held matrix, and the score counters. The
/// upcoming pieces and counters are carried for deeper search variants;
/// the baseline one-ply policy reads only the board, the current piece, and
/// the hold slot.
///
/// `hold_piece` is `None` whenever the hold primitive cannot fire: nothing
/// stashed yet and the slot unavailable this placement look the same to the
/// policy, which treats both as an unconditionally losing hold branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Board,
    pub current_piece: Piece,
    #[serde(default)]
    pub next_pieces: Vec<ShapeMatrix>,
    #[serde(default)]
    pub hold_piece: Option<ShapeMatrix>,
    #[serde(default)]
    pub score: usize,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub lines: usize,
}

impl GameSnapshot {
    /// Captures a snapshot of the given field.
    #[must_use]
    pub fn capture(field: &GameField) -> Self {
        let hold_piece = if field.can_hold() {
            field.held_matrix().cloned()
        } else {
            None
        };
        Self {
            board: field.board().clone(),
            current_piece: field.current_piece().clone(),
            next_pieces: field
                .next_pieces()
                .map(PieceKind::spawn_matrix)
                .collect(),
            hold_piece,
            score: field.stats().score(),
            level: field.stats().level(),
            lines: field.stats().total_cleared_lines(),
        }
    }

    /// Fails fast on malformed piece matrices.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        validate_matrix(self.current_piece.matrix())?;
        if let Some(held) = &self.hold_piece {
            validate_matrix(held)?;
        }
        Ok(())
    }
}

fn validate_matrix(matrix: &ShapeMatrix) -> Result<(), SnapshotError> {
    if matrix.occupied_offsets().next().is_none() {
        return Err(SnapshotError::EmptyPieceMatrix);
    }
    if matrix.width() > Board::WIDTH || matrix.height() > Board::HEIGHT {
        return Err(SnapshotError::OversizedPieceMatrix {
            width: matrix.width(),
            height: matrix.height(),
        });
    }
    Ok(())
}
