use clap::{Parser, Subcommand};

mod auto_play;
mod dump_weights;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run the autopilot headlessly and print a session summary
    AutoPlay(auto_play::AutoPlayArg),
    /// Print the default evaluator weight set as JSON
    DumpWeights(dump_weights::DumpWeightsArg),
}

pub fn run() -> anyhow::Result<()> {
    match CommandArgs::parse().mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg),
        Mode::DumpWeights(arg) => dump_weights::run(&arg),
    }
}
