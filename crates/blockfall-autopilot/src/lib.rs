//! Heuristic autopilot for the falling-block core.
//!
//! Given an immutable [`GameSnapshot`] of the playfield, the autopilot
//! enumerates every reachable final placement of the current piece
//! ([`enumerate_moves`]), scores each resulting board with the placement
//! evaluator, weighs a hypothetical hold swap, and returns exactly one
//! [`Decision`]: the first primitive action to apply plus the full planned
//! sequence, or a bare `hold`.
//!
//! The autopilot never mutates live game state. The host applies the
//! returned actions through its own primitives; because the engine's
//! [`GameField`](blockfall_engine::GameField) implements exactly the
//! semantics the planner assumes, a planned sequence lands the piece where
//! the autopilot predicted.
//!
//! Each call is a pure function of its snapshot, so identical snapshots
//! yield identical decisions. The entry point is synchronous; a host that
//! must not block its frame loop can defer the call itself.

pub use self::{
    move_gen::{CandidateMove, enumerate_moves},
    policy::{Autopilot, Decision},
    snapshot::{GameSnapshot, SnapshotError},
};

mod move_gen;
mod policy;
mod snapshot;
