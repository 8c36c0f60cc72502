mod cmd;

use anyhow::Result;
use clap::Parser;

/// cellgrad — train and inspect a single-cell LSTM.
#[derive(Parser)]
#[command(name = "cellgrad", version, about)]
struct Cli {
    #[command(subcommand)]
    command: cmd::Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cmd::run(cli.command)
}
