use std::{fs, path::PathBuf};

use anyhow::Context as _;
use blockfall_autopilot::{Autopilot, GameSnapshot};
use blockfall_engine::{Action, BagSeed, GameField};
use blockfall_evaluator::EvalWeights;
use chrono::{DateTime, Utc};
use clap::Args;
use rand::Rng as _;
use serde::Serialize;

#[derive(Debug, Clone, Args)]
pub struct AutoPlayArg {
    /// Maximum number of pieces to place
    #[arg(long, default_value_t = 500)]
    pieces: usize,
    /// Hexadecimal piece-sequence seed (random when omitted)
    #[arg(long)]
    seed: Option<BagSeed>,
    /// Path to a JSON weight-set file (shipped defaults when omitted)
    #[arg(long)]
    weights: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: BagSeed,
    finished_at: DateTime<Utc>,
    pieces_placed: usize,
    score: usize,
    level: usize,
    lines: usize,
    line_clears: [usize; 5],
    topped_out: bool,
}

pub fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let weights = load_weights(arg.weights.as_deref())?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());

    let mut field = GameField::with_seed(seed);
    let autopilot = Autopilot::new(weights);

    while field.state().is_playing() && field.stats().completed_pieces() < arg.pieces {
        let snapshot = GameSnapshot::capture(&field);
        let decision = autopilot.decide(&snapshot)?;
        match decision.full_action_sequence() {
            Some(sequence) => {
                for &action in sequence {
                    field.apply(action);
                }
            }
            None if decision.action() == Action::Hold => field.apply(Action::Hold),
            // The fallback means no placement is reachable; the session
            // cannot progress without gravity, so stop here.
            None => break,
        }
    }

    let stats = field.stats();
    let summary = SessionSummary {
        seed,
        finished_at: Utc::now(),
        pieces_placed: stats.completed_pieces(),
        score: stats.score(),
        level: stats.level(),
        lines: stats.total_cleared_lines(),
        line_clears: *stats.line_cleared_counter(),
        topped_out: field.state().is_game_over(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_weights(path: Option<&std::path::Path>) -> anyhow::Result<EvalWeights> {
    let Some(path) = path else {
        return Ok(EvalWeights::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read weight set from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse weight set in {}", path.display()))
}
