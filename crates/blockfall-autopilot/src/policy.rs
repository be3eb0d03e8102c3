use blockfall_engine::{Action, Piece, PiecePosition};
use blockfall_evaluator::{EvalWeights, PlacementEvaluator, WeightedSumEvaluator};
use serde::Serialize;

use crate::{
    move_gen::{CandidateMove, enumerate_moves},
    snapshot::{GameSnapshot, SnapshotError},
};

/// Spawn column used for the hypothetical hold piece.
const HOLD_SPAWN_COLUMN: i16 = 4;

/// The single decision returned per call: the action to apply now and, for
/// placements, the complete planned sequence.
///
/// Serializes to the host's `{"action": ..., "fullActionSequence": [...]}`
/// shape; hold and fallback decisions omit the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_action_sequence: Option<Vec<Action>>,
}

impl Decision {
    fn hold() -> Self {
        Self {
            action: Action::Hold,
            full_action_sequence: None,
        }
    }

    fn placement(sequence: Vec<Action>) -> Self {
        Self {
            action: sequence[0],
            full_action_sequence: Some(sequence),
        }
    }

    /// The deterministic answer when no placement is reachable and hold is
    /// unavailable: nudge sideways rather than fail.
    fn fallback() -> Self {
        Self {
            action: Action::MoveLeft,
            full_action_sequence: None,
        }
    }

    /// The immediate action to apply.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// The full planned sequence, when this decision is a placement.
    #[must_use]
    pub fn full_action_sequence(&self) -> Option<&[Action]> {
        self.full_action_sequence.as_deref()
    }
}

/// One-ply decision policy: best direct placement versus best hold swap.
#[derive(Debug)]
pub struct Autopilot {
    evaluator: Box<dyn PlacementEvaluator>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

impl Autopilot {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Self::with_evaluator(Box::new(WeightedSumEvaluator::new(weights)))
    }

    #[must_use]
    pub fn with_evaluator(evaluator: Box<dyn PlacementEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Chooses exactly one decision for the snapshot.
    ///
    /// Scores every reachable placement of the current piece, then the best
    /// placement of the held matrix against the same board; hold wins only
    /// on a strictly higher score. With no reachable placement and no hold,
    /// the deterministic fallback is returned, never an error.
    ///
    /// Errors only on contract violations in the snapshot shape.
    pub fn decide(&self, snapshot: &GameSnapshot) -> Result<Decision, SnapshotError> {
        snapshot.validate()?;

        let mut best_score = f32::NEG_INFINITY;
        let mut best_move: Option<CandidateMove> = None;
        for candidate in enumerate_moves(&snapshot.board, &snapshot.current_piece) {
            let score = self.score(&candidate);
            if score > best_score {
                best_score = score;
                best_move = Some(candidate);
            }
        }

        if self.hold_score(snapshot) > best_score {
            return Ok(Decision::hold());
        }

        Ok(match best_move {
            Some(candidate) => Decision::placement(candidate.into_actions()),
            None => Decision::fallback(),
        })
    }

    /// Best achievable score after a hold swap, or negative infinity when
    /// the snapshot offers nothing to hold.
    fn hold_score(&self, snapshot: &GameSnapshot) -> f32 {
        let Some(matrix) = &snapshot.hold_piece else {
            return f32::NEG_INFINITY;
        };
        let piece = Piece::new(matrix.clone(), PiecePosition {
            x: HOLD_SPAWN_COLUMN,
            y: 0,
        });
        enumerate_moves(&snapshot.board, &piece)
            .iter()
            .map(|candidate| self.score(candidate))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn score(&self, candidate: &CandidateMove) -> f32 {
        self.evaluator
            .evaluate_placement(candidate.board(), candidate.cleared_lines())
    }
}
