mod step;
mod train;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Train a cell on a generated sine next-value task
    Train(train::TrainArgs),
    /// Run a single forward pass over a short series and print the outputs
    Step(step::StepArgs),
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Train(args) => train::run(args),
        Command::Step(args) => step::run(args),
    }
}
