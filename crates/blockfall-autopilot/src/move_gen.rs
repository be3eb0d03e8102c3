use std::iter;

use arrayvec::ArrayVec;
use blockfall_engine::{Action, Board, Piece, PiecePosition, ShapeMatrix};

/// One reachable final placement: the board after the piece has dropped and
/// lines have cleared, plus the primitive actions that reach it from the
/// piece's current pose.
#[derive(Debug, Clone)]
pub struct CandidateMove {
    board: Board,
    cleared_lines: usize,
    actions: Vec<Action>,
}

impl CandidateMove {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

/// Enumerates every reachable final placement of the piece on the board.
///
/// The 4 rotation states are generated by repeatedly applying the clockwise
/// transform, so symmetric pieces produce geometric duplicates that are
/// scored redundantly rather than filtered. For each state and each
/// horizontal offset, the piece is hard-dropped straight down (no rotation
/// or sideways motion during the fall). Placements that cannot fit are
/// skipped silently.
///
/// Candidates come back sorted by descending lines cleared. The order is a
/// performance hint for consumers that short-circuit; ties between
/// candidates are broken by evaluator score, never by position in this
/// list.
#[must_use]
pub fn enumerate_moves(board: &Board, piece: &Piece) -> Vec<CandidateMove> {
    let mut moves = Vec::new();

    for (rotations, matrix) in rotation_states(piece.matrix()).into_iter().enumerate() {
        let Some(max_x) = Board::WIDTH.checked_sub(matrix.width()) else {
            continue;
        };
        for x in 0..=max_x {
            let target_x = x as i16;
            let Some((resulting_board, cleared_lines)) = drop_at(board, &matrix, target_x) else {
                continue;
            };
            moves.push(CandidateMove {
                board: resulting_board,
                cleared_lines,
                actions: action_sequence(piece.position().x, target_x, rotations),
            });
        }
    }

    moves.sort_by(|a, b| b.cleared_lines.cmp(&a.cleared_lines));
    moves
}

/// The 4 rotation states of a matrix, starting from its current orientation.
fn rotation_states(matrix: &ShapeMatrix) -> ArrayVec<ShapeMatrix, 4> {
    let mut states = ArrayVec::new();
    let mut current = matrix.clone();
    for _ in 0..4 {
        let next = current.rotated_cw();
        states.push(current);
        current = next;
    }
    states
}

/// Drops the matrix straight down at column `x` and resolves line clears.
///
/// Returns `None` when the matrix cannot come to rest there (the column is
/// already blocked at the top).
fn drop_at(board: &Board, matrix: &ShapeMatrix, x: i16) -> Option<(Board, usize)> {
    let mut piece = Piece::new(matrix.clone(), PiecePosition { x, y: 0 });
    if board.collides(&piece) {
        return None;
    }
    loop {
        let lowered = piece.lowered();
        if board.collides(&lowered) {
            break;
        }
        piece = lowered;
    }

    let mut resulting_board = board.clone();
    resulting_board.fill_piece(&piece);
    let cleared_lines = resulting_board.clear_lines();
    Some((resulting_board, cleared_lines))
}

/// N rotations, then the horizontal shifts, then the hard drop.
fn action_sequence(origin_x: i16, target_x: i16, rotations: usize) -> Vec<Action> {
    let shifts = (target_x - origin_x).unsigned_abs() as usize;
    let mut actions = Vec::with_capacity(rotations + shifts + 1);
    actions.extend(iter::repeat_n(Action::Rotate, rotations));
    let shift = if target_x < origin_x {
        Action::MoveLeft
    } else {
        Action::MoveRight
    };
    actions.extend(iter::repeat_n(shift, shifts));
    actions.push(Action::HardDrop);
    actions
}
