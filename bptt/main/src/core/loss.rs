//! Squared-error loss over realized outputs.

use crate::api::error::{BpttError, BpttResult};
use crate::core::unroll::Sequence;
use cellgrad_core::Vector;

/// Per-timestep loss `E_t = Σ (y − target)²` — an unnormalized elementwise
/// sum of squares.
pub fn squared_error(y: &Vector, target: &Vector) -> BpttResult<f64> {
    Ok(y.sub(target)?.sum_of_squares())
}

/// Total loss `Σ E_t` over a sequence, paired with its targets in time order.
pub fn sequence_loss(seq: &Sequence, targets: &[Vector]) -> BpttResult<f64> {
    if targets.len() != seq.len() {
        return Err(BpttError::Dimension {
            expected: seq.len(),
            got: targets.len(),
        });
    }
    let mut total = 0.0;
    for (snap, target) in seq.iter().zip(targets.iter()) {
        total += squared_error(&snap.y, target)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::LstmCell;
    use crate::core::unroll;

    #[test]
    fn test_squared_error_unnormalized() {
        let y = Vector::from_vec(vec![1.0, -1.0]);
        let target = Vector::from_vec(vec![0.5, 0.5]);
        // (0.5)² + (−1.5)² = 2.5 — no division by the element count.
        assert!((squared_error(&y, &target).unwrap() - 2.5).abs() < 1e-15);
    }

    #[test]
    fn test_squared_error_dim_mismatch() {
        let y = Vector::zeros(2);
        let target = Vector::zeros(3);
        assert!(squared_error(&y, &target).is_err());
    }

    #[test]
    fn test_sequence_loss_sums_timesteps() {
        let mut cell = LstmCell::new(1, 2, 1).unwrap();
        cell.init_random();
        cell.reset_state();
        let series = vec![Vector::from_vec(vec![0.5]), Vector::from_vec(vec![-0.5])];
        let seq = unroll::run(&mut cell, &series).unwrap();

        let targets = vec![Vector::from_vec(vec![0.0]), Vector::from_vec(vec![0.0])];
        let total = sequence_loss(&seq, &targets).unwrap();
        let by_hand: f64 = seq
            .iter()
            .map(|s| s.y.as_slice()[0] * s.y.as_slice()[0])
            .sum();
        assert!((total - by_hand).abs() < 1e-15);

        assert!(sequence_loss(&seq, &targets[..1]).is_err());
    }
}
