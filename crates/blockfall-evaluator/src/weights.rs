use serde::{Deserialize, Serialize};

/// The tunable weight set of the placement evaluator.
///
/// One flat structure so a whole set can be dumped, edited, and loaded back
/// as JSON without code changes. Missing fields in a loaded file fall back
/// to the shipped defaults, so partial retune files work.
///
/// Penalty terms carry negative weights, bonus terms positive ones.
/// `lookahead_depth` and `exploration_depth` are reserved for deeper search
/// variants; the baseline one-ply policy does not consume them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Penalty per unit of summed column height.
    pub aggregate_height: f32,
    /// Penalty on the max column height once it exceeds the danger
    /// threshold.
    pub max_height_overflow: f32,
    /// Penalty per unit of column-height variance.
    pub height_variance: f32,
    /// Base bonus for a single line clear; doubles and triples scale it.
    pub line_clear_bonus: f32,
    /// Flat bonus for a four-line clear.
    pub tetris_clear_bonus: f32,
    /// Penalty per covered empty cell.
    pub holes: f32,
    /// Extra penalty per hole walled in on both sides.
    pub blocked_holes: f32,
    /// Penalty per unit of adjacent-column height difference.
    pub bumpiness: f32,
    /// Penalty per unit of well depth.
    pub well_depth: f32,
    /// Bonus per near-full-row reward unit.
    pub placement_bonus: f32,
    /// Reserved: plies of piece lookahead for deeper search variants.
    pub lookahead_depth: u32,
    /// Reserved: exploration depth for deeper search variants.
    pub exploration_depth: u32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.55,
            max_height_overflow: -1.0,
            height_variance: -0.4,
            line_clear_bonus: 1.1,
            tetris_clear_bonus: 4.0,
            holes: -1.3,
            blocked_holes: -1.8,
            bumpiness: -0.5,
            well_depth: -0.75,
            placement_bonus: 0.3,
            lookahead_depth: 4,
            exploration_depth: 5,
        }
    }
}
