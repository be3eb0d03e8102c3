//! Heuristic evaluation of board states.
//!
//! The evaluator assigns each candidate placement a scalar desirability
//! score, computed as a weighted linear sum of structural terms over the
//! resulting board's column-height profile plus a tiered line-clear bonus:
//!
//! ```text
//! score = w_height * aggregate_height
//!       + w_overflow * max_height_over_threshold
//!       + w_variance * height_variance
//!       + line_clear_bonus(cleared)
//!       + w_holes * holes + w_blocked * blocked_holes
//!       + w_bumpiness * bumpiness + w_well * well_depth
//!       + w_placement * near_full_row_reward
//! ```
//!
//! Strictly higher is better. All coefficients live in [`EvalWeights`], one
//! serde-friendly structure, so a retuned set can be loaded from JSON
//! without code changes.
//!
//! Board terms are extracted by [`BoardMetrics`], which computes each metric
//! lazily and at most once per board.

pub use self::{
    board_metrics::BoardMetrics,
    placement_evaluator::{PlacementEvaluator, WeightedSumEvaluator},
    weights::EvalWeights,
};

mod board_metrics;
mod placement_evaluator;
mod weights;
