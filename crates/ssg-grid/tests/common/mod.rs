#![allow(dead_code)]

use ssg_core::{AxisKind, AxisValue, Observation, StateTrajectory};
use ssg_grid::QuantizationConfig;

/// Builds a trajectory from `(x, y, t)` triples.
pub fn trajectory<X, Y>(id: &str, states: Vec<(X, Y, f64)>) -> StateTrajectory
where
    X: Into<AxisValue>,
    Y: Into<AxisValue>,
{
    let observations = states
        .into_iter()
        .map(|(x, y, t)| Observation::new(x, y, t))
        .collect();
    StateTrajectory::new(id, observations).expect("valid trajectory")
}

/// Numeric points with timestamps `0, 1, 2, ...`.
pub fn numeric(id: &str, points: &[(f64, f64)]) -> StateTrajectory {
    let states = points
        .iter()
        .enumerate()
        .map(|(idx, (x, y))| (*x, *y, idx as f64))
        .collect();
    trajectory(id, states)
}

/// The two-trajectory batch with a categorical x axis used across tests.
pub fn abc_batch() -> (Vec<StateTrajectory>, QuantizationConfig) {
    let first = trajectory("p1", vec![("A", 0.0, 0.0), ("B", 1.0, 1.0), ("A", 2.0, 2.0)]);
    let second = trajectory("p2", vec![("A", 0.5, 0.5), ("C", 1.5, 1.5)]);
    let config = QuantizationConfig::default()
        .with_axes(AxisKind::categorical(["A", "B", "C"]), AxisKind::Numeric)
        .with_cell_size(1.0, 1.0);
    (vec![first, second], config)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
