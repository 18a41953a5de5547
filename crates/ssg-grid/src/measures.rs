use serde::{Deserialize, Serialize};
use ssg_core::{ErrorInfo, SsgError};
use tracing::trace;

use crate::bins::{self, BinCounts};
use crate::bounds::GridBounds;
use crate::grid::ResolvedTrajectory;

/// Per-trajectory quantities feeding the aggregate measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMeasures {
    /// Trajectory identifier.
    pub id: String,
    /// Last timestamp minus first timestamp.
    pub duration: f64,
    /// Number of raw observations.
    pub events: usize,
    /// Number of visits reported by the trajectory.
    pub visits: usize,
    /// Distinct cells reported by the trajectory.
    pub cell_range: usize,
    /// Dispersion over the resolved grid.
    pub dispersion: f64,
    /// Sum of visit proportions per cell.
    pub visited_entropy: f64,
}

/// Aggregate statistics over one batch of trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMeasures {
    /// Contributing trajectory identifiers in input order.
    pub trajectory_ids: Vec<String>,
    /// Mean trajectory duration.
    pub mean_duration: f64,
    /// Mean number of observations.
    pub mean_number_of_events: f64,
    /// Mean number of visits.
    pub mean_number_of_visits: f64,
    /// Mean number of distinct cells per trajectory.
    pub mean_cell_range: f64,
    /// Distinct cells in the pooled bin counts of the whole batch.
    pub overall_cell_range: usize,
    /// Mean of the per-trajectory `duration / events` ratios.
    pub mean_duration_per_event: f64,
    /// Mean of the per-trajectory `duration / visits` ratios.
    pub mean_duration_per_visit: f64,
    /// Mean of the per-trajectory `duration / cell_range` ratios.
    pub mean_duration_per_cell: f64,
    /// Mean dispersion.
    pub dispersion: f64,
    /// Mean of the per-trajectory sums of `count / visits` over visited cells.
    ///
    /// This sums proportions rather than computing `-Σ p log p`, so it is
    /// exactly 1 for any trajectory with at least one visit.
    pub visited_entropy: f64,
}

/// Computes the per-trajectory rows and the aggregate measures.
///
/// Fails atomically: the first trajectory with a zero denominator aborts the
/// whole computation.
pub fn compute_measures(
    resolved: &[ResolvedTrajectory<'_>],
    bounds: &GridBounds,
) -> Result<(Vec<TrajectoryMeasures>, GridMeasures), SsgError> {
    if resolved.is_empty() {
        let info = ErrorInfo::new("no-trajectories", "measures need at least one trajectory");
        return Err(SsgError::EmptyInput(info));
    }
    let total_cells = bounds.total_cells()?;

    let mut rows = Vec::with_capacity(resolved.len());
    let mut pooled = BinCounts::new();
    for traj in resolved {
        let row = trajectory_measures(traj, total_cells)?;
        bins::accumulate(&mut pooled, &traj.states.x, &traj.states.y);
        trace!(id = %row.id, duration = row.duration, visits = row.visits, "trajectory measures");
        rows.push(row);
    }

    let measures = GridMeasures {
        trajectory_ids: rows.iter().map(|row| row.id.clone()).collect(),
        mean_duration: mean(rows.iter().map(|row| row.duration)),
        mean_number_of_events: mean(rows.iter().map(|row| row.events as f64)),
        mean_number_of_visits: mean(rows.iter().map(|row| row.visits as f64)),
        mean_cell_range: mean(rows.iter().map(|row| row.cell_range as f64)),
        overall_cell_range: pooled.len(),
        mean_duration_per_event: mean(rows.iter().map(|row| row.duration / row.events as f64)),
        mean_duration_per_visit: mean(rows.iter().map(|row| row.duration / row.visits as f64)),
        mean_duration_per_cell: mean(rows.iter().map(|row| row.duration / row.cell_range as f64)),
        dispersion: mean(rows.iter().map(|row| row.dispersion)),
        visited_entropy: mean(rows.iter().map(|row| row.visited_entropy)),
    };
    Ok((rows, measures))
}

fn trajectory_measures(
    traj: &ResolvedTrajectory<'_>,
    total_cells: u64,
) -> Result<TrajectoryMeasures, SsgError> {
    let source = traj.source;
    let id = source.id();
    let events = source.event_count();
    if events == 0 {
        return Err(SsgError::degenerate_trajectory(id, "no-observations", "trajectory has no observations"));
    }
    let visits = source.num_visits();
    if visits == 0 {
        return Err(SsgError::degenerate_trajectory(id, "no-visits", "trajectory reports zero visits"));
    }
    let cell_range = source.cell_range();
    if cell_range == 0 {
        return Err(SsgError::degenerate_trajectory(id, "no-cells", "trajectory reports zero cell range"));
    }

    // Counts per visit, so the proportions below sum to one.
    let visit_bins = bins::bin_counts(&traj.states.x, &traj.states.y);
    let visited_entropy = visit_bins
        .values()
        .map(|count| *count as f64 / visits as f64)
        .sum::<f64>();

    Ok(TrajectoryMeasures {
        id: id.to_string(),
        duration: source.duration(),
        events,
        visits,
        cell_range,
        dispersion: source.dispersion(total_cells),
        visited_entropy,
    })
}

// Callers guarantee at least one value; summation follows input order.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len() as f64;
    values.sum::<f64>() / len
}
