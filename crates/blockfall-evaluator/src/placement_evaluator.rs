use std::fmt;

use blockfall_engine::Board;

use crate::{board_metrics::BoardMetrics, weights::EvalWeights};

/// Max column height above which the overflow penalty kicks in.
const MAX_HEIGHT_DANGER_THRESHOLD: u8 = 15;

/// Reward per near-full-row unit, scaled by the placement-bonus weight.
const NEAR_FULL_ROW_REWARD: f32 = 0.5;

/// Scores the outcome of dropping a piece: the resulting board plus the
/// lines the drop cleared. Strictly higher is better.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_placement(&self, board: &Board, cleared_lines: usize) -> f32;
}

/// Weighted linear sum over [`BoardMetrics`] terms plus the tiered
/// line-clear bonus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSumEvaluator {
    weights: EvalWeights,
}

impl WeightedSumEvaluator {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl PlacementEvaluator for WeightedSumEvaluator {
    fn evaluate_placement(&self, board: &Board, cleared_lines: usize) -> f32 {
        let metrics = BoardMetrics::from_board(board);
        let w = &self.weights;

        let max_height = metrics.max_height();
        let overflow = if max_height > MAX_HEIGHT_DANGER_THRESHOLD {
            f32::from(max_height)
        } else {
            0.0
        };

        w.aggregate_height * metrics.aggregate_height() as f32
            + w.max_height_overflow * overflow
            + w.height_variance * metrics.height_variance()
            + line_clear_bonus(cleared_lines, w)
            + w.holes * metrics.num_holes() as f32
            + w.blocked_holes * metrics.blocked_holes() as f32
            + w.bumpiness * metrics.bumpiness() as f32
            + w.well_depth * metrics.well_depth() as f32
            + w.placement_bonus * NEAR_FULL_ROW_REWARD * metrics.near_full_rows() as f32
    }
}

/// Tiered line-clear bonus: singles pay the base, doubles 2.5x, triples 5x,
/// and a tetris pays its own flat bonus.
fn line_clear_bonus(cleared_lines: usize, weights: &EvalWeights) -> f32 {
    match cleared_lines {
        1 => weights.line_clear_bonus,
        2 => weights.line_clear_bonus * 2.5,
        3 => weights.line_clear_bonus * 5.0,
        4 => weights.tetris_clear_bonus,
        _ => 0.0,
    }
}
