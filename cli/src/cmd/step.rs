use anyhow::Result;
use cellgrad_bptt::{unroll, LstmCell, Vector};
use clap::Args;

#[derive(Args)]
pub struct StepArgs {
    /// Hidden state size of the cell
    #[arg(long, default_value_t = 4)]
    hidden_dim: usize,

    /// Inputs to feed, one scalar per timestep
    #[arg(long, value_delimiter = ',', default_value = "0.0,0.5,1.0")]
    inputs: Vec<f64>,
}

pub fn run(args: StepArgs) -> Result<()> {
    let mut cell = LstmCell::new(1, args.hidden_dim, 1)?;
    cell.init_random();

    let series: Vec<Vector> = args
        .inputs
        .iter()
        .map(|&v| Vector::from_vec(vec![v]))
        .collect();
    let seq = unroll(&mut cell, &series)?;

    for (t, snap) in seq.iter().enumerate() {
        println!(
            "t={t} x={:+.4} y={:+.6} |c|={:.6} |h|={:.6}",
            snap.x.as_slice()[0],
            snap.y.as_slice()[0],
            snap.c.sum_of_squares().sqrt(),
            snap.h.sum_of_squares().sqrt(),
        );
    }

    Ok(())
}
