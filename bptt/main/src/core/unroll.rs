//! Unrolling a cell across an input series into per-timestep snapshots.

use crate::api::error::BpttResult;
use crate::core::cell::LstmCell;
use cellgrad_core::Vector;

/// Immutable capture of one timestep, taken after `step` and before
/// `advance`.
///
/// Holds exactly what the backward pass and loss reporting need — the gate
/// activations, the cell/hidden state, the recurrent inputs the step read,
/// the input itself, and the realized output. Parameters are not copied.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub x: Vector,
    pub h_prev: Vector,
    pub c_prev: Vector,
    pub f: Vector,
    pub i: Vector,
    pub o: Vector,
    pub ca: Vector,
    pub c: Vector,
    pub h: Vector,
    pub y: Vector,
}

/// A time-ordered sequence of snapshots from one unroll, one per input.
///
/// Scoped to a single backward pass; drop it once the gradients have been
/// taken.
#[derive(Debug, Clone)]
pub struct Sequence {
    input_dim: usize,
    hidden_dim: usize,
    steps: Vec<Snapshot>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn get(&self, t: usize) -> Option<&Snapshot> {
        self.steps.get(t)
    }

    pub fn steps(&self) -> &[Snapshot] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.steps.iter()
    }
}

/// Drive `cell` across `series`, committing the recurrent state between
/// steps.
///
/// Produces exactly one snapshot per input, in time order. The recurrent
/// state at the first step is whatever the cell currently holds — zero it
/// with `reset_state` for a fresh sequence, or leave it to continue one.
pub fn run(cell: &mut LstmCell, series: &[Vector]) -> BpttResult<Sequence> {
    let mut steps = Vec::with_capacity(series.len());

    for x in series {
        cell.step(x)?;
        steps.push(Snapshot {
            x: cell.x().clone(),
            h_prev: cell.h_prev().clone(),
            c_prev: cell.c_prev().clone(),
            f: cell.f().clone(),
            i: cell.i().clone(),
            o: cell.o().clone(),
            ca: cell.ca().clone(),
            c: cell.c().clone(),
            h: cell.h().clone(),
            y: cell.y().clone(),
        });
        cell.advance();
    }

    Ok(Sequence {
        input_dim: cell.input_dim(),
        hidden_dim: cell.hidden_dim(),
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_cell() -> LstmCell {
        let mut cell = LstmCell::new(2, 3, 1).unwrap();
        cell.init_random();
        cell
    }

    fn series(n: usize) -> Vec<Vector> {
        (0..n)
            .map(|t| Vector::from_vec(vec![t as f64 * 0.1, 1.0 - t as f64 * 0.1]))
            .collect()
    }

    #[test]
    fn test_one_snapshot_per_input() {
        let mut cell = random_cell();
        cell.reset_state();
        let seq = run(&mut cell, &series(5)).unwrap();
        assert_eq!(seq.len(), 5);
        for (t, snap) in seq.iter().enumerate() {
            assert_eq!(snap.x.as_slice(), series(5)[t].as_slice());
        }
    }

    #[test]
    fn test_empty_series_yields_empty_sequence() {
        let mut cell = random_cell();
        let seq = run(&mut cell, &[]).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.input_dim(), 2);
        assert_eq!(seq.hidden_dim(), 3);
    }

    #[test]
    fn test_recurrent_state_flows_between_steps() {
        let mut cell = random_cell();
        cell.reset_state();
        let seq = run(&mut cell, &series(3)).unwrap();

        // Step t reads the state committed by step t-1.
        for t in 1..seq.len() {
            assert_eq!(seq.get(t).unwrap().h_prev, seq.get(t - 1).unwrap().h);
            assert_eq!(seq.get(t).unwrap().c_prev, seq.get(t - 1).unwrap().c);
        }
        // And the cell ends holding the last step's state.
        assert_eq!(cell.h_prev(), &seq.get(2).unwrap().h);
        assert_eq!(cell.c_prev(), &seq.get(2).unwrap().c);
    }

    #[test]
    fn test_deterministic_given_same_start() {
        let mut cell = random_cell();
        cell.reset_state();
        let first = run(&mut cell, &series(4)).unwrap();

        cell.reset_state();
        let second = run(&mut cell, &series(4)).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.h, b.h);
            assert_eq!(a.c, b.c);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_bad_input_aborts_unroll() {
        let mut cell = random_cell();
        let bad = vec![Vector::zeros(2), Vector::zeros(4)];
        assert!(run(&mut cell, &bad).is_err());
    }
}
