use std::{fs, path::PathBuf};

use anyhow::Context as _;
use blockfall_evaluator::EvalWeights;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct DumpWeightsArg {
    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &DumpWeightsArg) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EvalWeights::default())?;
    match &arg.output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write weight set to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
