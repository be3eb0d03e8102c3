//! Game state management: the host primitives the autopilot's action
//! sequences are executed against.
//!
//! - [`GameField`] - playfield state machine (board, falling piece, bag, hold)
//! - [`PieceBag`] - 7-bag piece generation with a serializable seed
//! - [`GameStats`] - score, level, and line-clear bookkeeping
//! - [`Action`] - the action vocabulary shared with the decision policy

pub use self::{action::*, game_field::*, game_stats::*, piece_bag::*};

mod action;
mod game_field;
mod game_stats;
mod piece_bag;
