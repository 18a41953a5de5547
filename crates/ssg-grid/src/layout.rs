use serde::{Deserialize, Serialize};
use ssg_core::{AxisKind, SsgError};

use crate::bounds::GridBounds;
use crate::config::QuantizationConfig;
use crate::grid::ResolvedTrajectory;
use crate::overlap::{self, OffsetTrajectory};

/// Tick mark on one axis of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Coordinate of the tick.
    pub position: f64,
    /// Category label or formatted position; `None` past the end of an ordering.
    pub label: Option<String>,
}

/// Everything a renderer consumes to draw the grid and its trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Resolved cell sizes and bounds.
    pub bounds: GridBounds,
    /// Ticks along x, one per cell position.
    pub x_ticks: Vec<Tick>,
    /// Ticks along y, one per cell position.
    pub y_ticks: Vec<Tick>,
    /// Longest gap between consecutive visits anywhere in the batch.
    pub max_step_duration: f64,
    /// Overlap-resolved trajectories in input order.
    pub trajectories: Vec<OffsetTrajectory>,
}

pub(crate) fn build_layout(
    resolved: &[ResolvedTrajectory<'_>],
    bounds: &GridBounds,
    config: &QuantizationConfig,
) -> Result<GridLayout, SsgError> {
    let max_step_duration = resolved
        .iter()
        .flat_map(|traj| traj.states.t.windows(2).map(|pair| pair[1] - pair[0]))
        .fold(0.0, f64::max);
    Ok(GridLayout {
        bounds: *bounds,
        x_ticks: ticks(&config.x_axis, bounds.min_x, bounds.cell_size_x, bounds.columns()?),
        y_ticks: ticks(&config.y_axis, bounds.min_y, bounds.cell_size_y, bounds.rows()?),
        max_step_duration,
        trajectories: overlap::offset_trajectories(resolved, bounds.cell_size_x, bounds.cell_size_y),
    })
}

/// Lays out `count` ticks from `min` in steps of `cell`.
///
/// Numeric labels carry as many decimals as the shortest form of `cell`.
pub fn ticks(axis: &AxisKind, min: f64, cell: f64, count: u64) -> Vec<Tick> {
    let decimals = decimal_places(cell);
    (0..count)
        .map(|idx| {
            let position = min + idx as f64 * cell;
            let label = match axis.ordering() {
                Some(ordering) => category_at(ordering.len(), position)
                    .map(|slot| ordering[slot].to_string()),
                None => Some(format!("{position:.decimals$}")),
            };
            Tick { position, label }
        })
        .collect()
}

fn category_at(len: usize, position: f64) -> Option<usize> {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-9 || rounded < 0.0 || rounded >= len as f64 {
        return None;
    }
    Some(rounded as usize)
}

fn decimal_places(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}
