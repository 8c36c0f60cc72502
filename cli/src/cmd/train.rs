use anyhow::Result;
use cellgrad_bptt::{LstmCell, Metrics, TrainConfig, Trainer, Vector};
use clap::Args;

#[derive(Args)]
pub struct TrainArgs {
    /// Hidden state size of the cell
    #[arg(long, default_value_t = 8)]
    hidden_dim: usize,

    /// Length of the generated series
    #[arg(long, default_value_t = 16)]
    steps: usize,

    /// Number of training epochs
    #[arg(long, default_value_t = 500)]
    epochs: usize,

    /// Gradient-descent learning rate
    #[arg(long, default_value_t = cellgrad_bptt::DEFAULT_LEARNING_RATE)]
    learning_rate: f64,
}

pub fn run(args: TrainArgs) -> Result<()> {
    let config = TrainConfig {
        learning_rate: args.learning_rate,
        epochs: args.epochs,
    };

    let mut cell = LstmCell::new(1, args.hidden_dim, 1)?;
    cell.init_random();
    let mut trainer = Trainer::from_config(cell, &config)?;

    let (series, targets) = sine_task(args.steps);
    log::info!(
        "training hidden_dim={} over {} steps for {} epochs (lr={})",
        args.hidden_dim,
        args.steps,
        config.epochs,
        config.learning_rate
    );

    let history = trainer.fit(&series, &targets, config.epochs)?;
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("loss: {first:.6} -> {last:.6} over {} epochs", history.len());
    }

    let outputs = trainer.predict(&series)?;
    let mut metrics = Metrics::new();
    for (y, target) in outputs.iter().zip(targets.iter()) {
        metrics.update(y.as_slice(), target.as_slice());
    }
    println!(
        "final mse={:.6} mae={:.6} rmse={:.6}",
        metrics.mse(),
        metrics.mae(),
        metrics.rmse()
    );

    Ok(())
}

/// Next-value prediction on a sine wave: input sin(0.4t), target sin(0.4(t+1)).
fn sine_task(steps: usize) -> (Vec<Vector>, Vec<Vector>) {
    let series = (0..steps)
        .map(|t| Vector::from_vec(vec![(0.4 * t as f64).sin()]))
        .collect();
    let targets = (0..steps)
        .map(|t| Vector::from_vec(vec![(0.4 * (t + 1) as f64).sin()]))
        .collect();
    (series, targets)
}
