use crate::{
    HoldUnavailableError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, ShapeMatrix},
    },
};

use super::{Action, BagSeed, GameStats, PieceBag};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Playfield state machine: board, falling piece, piece bag, hold slot, and
/// statistics.
///
/// This is the host side of the action contract: the autopilot plans in
/// terms of [`Action`] sequences, and `apply` executes them with exactly the
/// semantics the planner assumed (revert-on-collision shifts, re-centering
/// rotation retry, lock on contact).
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    current: Piece,
    bag: PieceBag,
    held: Option<ShapeMatrix>,
    can_hold: bool,
    stats: GameStats,
    state: SessionState,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_bag(PieceBag::new())
    }

    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self::with_bag(PieceBag::with_seed(seed))
    }

    fn with_bag(mut bag: PieceBag) -> Self {
        let current = Piece::spawn(bag.pop_next());
        Self {
            board: Board::EMPTY,
            current,
            bag,
            held: None,
            can_hold: true,
            stats: GameStats::new(),
            state: SessionState::Playing,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn held_matrix(&self) -> Option<&ShapeMatrix> {
        self.held.as_ref()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.next_pieces()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Executes one primitive action. Does nothing after game over; a hold
    /// that is unavailable is a no-op, matching the host primitive.
    pub fn apply(&mut self, action: Action) {
        if self.state.is_game_over() {
            return;
        }
        match action {
            Action::MoveLeft => self.shift(-1),
            Action::MoveRight => self.shift(1),
            Action::Rotate => self.rotate(),
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::Hold => {
                let _ = self.try_hold();
            }
        }
    }

    fn shift(&mut self, dx: i16) {
        let moved = self.current.shifted(dx);
        if !self.board.collides(&moved) {
            self.current = moved;
        }
    }

    /// Rotates clockwise, nudging the piece sideways when the rotated pose
    /// collides: offsets +1, -2, +3, ... are tried cumulatively until the
    /// piece fits or the offset exceeds the rotated width, in which case the
    /// rotation is abandoned and the original pose restored. No wall-kick
    /// tables.
    fn rotate(&mut self) {
        let column = self.current.position().x;
        self.current = self.current.rotated_cw();
        let mut offset: i16 = 1;
        while self.board.collides(&self.current) {
            self.current = self.current.shifted(offset);
            offset = -(offset + if offset > 0 { 1 } else { -1 });
            if offset > self.current.matrix().width() as i16 {
                self.current = self
                    .current
                    .rotated_cw()
                    .rotated_cw()
                    .rotated_cw()
                    .with_column(column);
                return;
            }
        }
    }

    fn soft_drop(&mut self) {
        let lowered = self.current.lowered();
        if self.board.collides(&lowered) {
            self.lock_piece();
        } else {
            self.current = lowered;
        }
    }

    fn hard_drop(&mut self) {
        loop {
            let lowered = self.current.lowered();
            if self.board.collides(&lowered) {
                break;
            }
            self.current = lowered;
        }
        self.lock_piece();
    }

    /// Swaps the falling piece with the held matrix, or stashes it and
    /// spawns the next bag piece on first use. One hold per placement.
    ///
    /// The held matrix keeps whatever rotation it had when stashed.
    pub fn try_hold(&mut self) -> Result<(), HoldUnavailableError> {
        if !self.can_hold {
            return Err(HoldUnavailableError);
        }
        let stashed = self.current.matrix().clone();
        match self.held.take() {
            Some(matrix) => {
                self.current = Piece::from_matrix_at_spawn(matrix);
                self.held = Some(stashed);
            }
            None => {
                self.held = Some(stashed);
                self.spawn_next();
            }
        }
        self.can_hold = false;
        Ok(())
    }

    fn lock_piece(&mut self) {
        self.board.fill_piece(&self.current);
        let cleared_lines = self.board.clear_lines();
        self.stats.complete_piece_drop(cleared_lines);
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        self.current = Piece::spawn(self.bag.pop_next());
        self.can_hold = true;
        if self.board.collides(&self.current) {
            self.state = SessionState::GameOver;
        }
    }
}
