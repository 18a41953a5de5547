use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::bins::{self, BinCounts, Cell};
use crate::grid::ResolvedTrajectory;

/// Offset radius as a fraction of the cell size on each axis.
pub const OFFSET_RADIUS: f64 = 0.25;

/// Render-ready coordinates for one trajectory after overlap resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetTrajectory {
    /// Identifier of the source trajectory.
    pub id: String,
    /// Perturbed x coordinate of every visit.
    pub x: Vec<f64>,
    /// Perturbed y coordinate of every visit.
    pub y: Vec<f64>,
    /// Visit onsets, unchanged.
    pub t: Vec<f64>,
    /// Loop indices carried through from the source states.
    pub loops: Vec<usize>,
}

/// Running slot assignment for one resolution pass.
///
/// `totals` holds the pooled count of every cell across the whole batch;
/// `taken` counts how many of those slots have been handed out so far.
#[derive(Debug, Clone)]
pub struct OccupancyCounter {
    totals: BinCounts,
    taken: BinCounts,
    cell_size_x: f64,
    cell_size_y: f64,
}

impl OccupancyCounter {
    /// Pools the cell counts of every trajectory in the batch.
    pub fn new(resolved: &[ResolvedTrajectory<'_>], cell_size_x: f64, cell_size_y: f64) -> Self {
        let mut totals = BinCounts::new();
        for traj in resolved {
            bins::accumulate(&mut totals, &traj.states.x, &traj.states.y);
        }
        Self {
            totals,
            taken: BinCounts::new(),
            cell_size_x,
            cell_size_y,
        }
    }

    /// Pooled number of points landing on `cell`.
    pub fn total(&self, cell: &Cell) -> usize {
        self.totals.get(cell).copied().unwrap_or(0)
    }

    /// Places the next point that lands on `(x, y)`.
    ///
    /// Shared cells hand out evenly spaced angular slots in call order; a
    /// point alone in its cell keeps its coordinate.
    pub fn place(&mut self, x: f64, y: f64) -> (f64, f64) {
        let cell = Cell::new(x, y);
        let total = self.total(&cell);
        if total <= 1 {
            return (x, y);
        }
        let slot = self.taken.entry(cell).or_insert(0);
        let angle = TAU * (*slot as f64) / (total as f64);
        *slot += 1;
        (
            x + OFFSET_RADIUS * self.cell_size_x * angle.cos(),
            y + OFFSET_RADIUS * self.cell_size_y * angle.sin(),
        )
    }
}

/// Spreads points that share a cell anywhere in the batch around the cell.
///
/// Trajectories are visited in list order and points in time order, with a
/// single counter shared across the whole pass.
pub fn offset_trajectories(
    resolved: &[ResolvedTrajectory<'_>],
    cell_size_x: f64,
    cell_size_y: f64,
) -> Vec<OffsetTrajectory> {
    let mut counter = OccupancyCounter::new(resolved, cell_size_x, cell_size_y);
    resolved
        .iter()
        .map(|traj| {
            let (x, y): (Vec<f64>, Vec<f64>) = traj
                .states
                .x
                .iter()
                .zip(&traj.states.y)
                .map(|(x, y)| counter.place(*x, *y))
                .unzip();
            OffsetTrajectory {
                id: traj.source.id().to_string(),
                x,
                y,
                t: traj.states.t.clone(),
                loops: traj.states.loops.clone(),
            }
        })
        .collect()
}
