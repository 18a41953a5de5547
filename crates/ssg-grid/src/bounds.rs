use serde::{Deserialize, Serialize};
use ssg_core::{Axis, ErrorInfo, SsgError};
use tracing::{debug, warn};

use crate::config::QuantizationConfig;
use crate::grid::ResolvedTrajectory;

/// Observed (or override-seeded) data extents before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    /// Smallest x extent.
    pub x_min: f64,
    /// Smallest y extent.
    pub y_min: f64,
    /// Largest x extent.
    pub x_max: f64,
    /// Largest y extent.
    pub y_max: f64,
}

/// Cell sizes and whole-cell bounds resolved for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Width of one cell.
    pub cell_size_x: f64,
    /// Height of one cell.
    pub cell_size_y: f64,
    /// Lower x bound, a multiple of `cell_size_x`.
    pub min_x: f64,
    /// Lower y bound, a multiple of `cell_size_y`.
    pub min_y: f64,
    /// Upper x bound, strictly above every observed x extent.
    pub max_x: f64,
    /// Upper y bound, strictly above every observed y extent.
    pub max_y: f64,
}

impl GridBounds {
    /// Number of cell positions along x, both bounds included.
    pub fn columns(&self) -> Result<u64, SsgError> {
        cell_positions(Axis::X, self.min_x, self.max_x, self.cell_size_x)
    }

    /// Number of cell positions along y, both bounds included.
    pub fn rows(&self) -> Result<u64, SsgError> {
        cell_positions(Axis::Y, self.min_y, self.max_y, self.cell_size_y)
    }

    /// Total cell count used to parameterise dispersion.
    ///
    /// Fails with `too-many-cells` when the grid does not fit in a `u64`.
    pub fn total_cells(&self) -> Result<u64, SsgError> {
        let (columns, rows) = (self.columns()?, self.rows()?);
        columns.checked_mul(rows).ok_or_else(|| {
            let info = ErrorInfo::new("too-many-cells", "grid cell count overflows")
                .with_context("axis", "x*y")
                .with_context("columns", columns.to_string())
                .with_context("rows", rows.to_string());
            SsgError::DegenerateAxis(info)
        })
    }
}

// Bounds are cell multiples, so the quotient is integral up to rounding error.
fn cell_positions(axis: Axis, min: f64, max: f64, cell: f64) -> Result<u64, SsgError> {
    let steps = ((max - min) / cell).round().max(0.0);
    let too_many = || {
        let info = ErrorInfo::new("too-many-cells", "axis holds more cells than can be counted")
            .with_context("axis", axis.name())
            .with_context("span", (max - min).to_string())
            .with_context("cell_size", cell.to_string());
        SsgError::DegenerateAxis(info)
    };
    // 2^64 as f64; anything at or above it saturates the cast.
    if !steps.is_finite() || steps >= u64::MAX as f64 {
        return Err(too_many());
    }
    (steps as u64).checked_add(1).ok_or_else(too_many)
}

/// Largest power of ten not exceeding `difference`.
///
/// A zero difference (an axis holding a single value) falls back to a unit
/// cell. Negative or non-finite differences are rejected.
pub fn scale(axis: Axis, difference: f64) -> Result<f64, SsgError> {
    if !difference.is_finite() || difference < 0.0 {
        let info = ErrorInfo::new("invalid-axis-range", "axis range is negative or not finite")
            .with_context("axis", axis.name())
            .with_context("difference", difference.to_string());
        return Err(SsgError::DegenerateAxis(info));
    }
    if difference == 0.0 {
        warn!(axis = axis.name(), "axis has zero range, using unit cell size");
        return Ok(1.0);
    }
    let mut exponent = 0i32;
    while power_of_ten(exponent) < difference {
        exponent += 1;
    }
    while power_of_ten(exponent) > difference {
        exponent -= 1;
    }
    Ok(power_of_ten(exponent))
}

// Exact for |exponent| <= 22; negative powers are a single correctly rounded division.
fn power_of_ten(exponent: i32) -> f64 {
    if exponent >= 0 {
        10f64.powi(exponent)
    } else {
        1.0 / 10f64.powi(-exponent)
    }
}

/// Floors `value` to the nearest multiple of `cell` at or below it.
pub fn round_down(value: f64, cell: f64) -> f64 {
    value - value.rem_euclid(cell)
}

/// Advances `value` to the next multiple of `cell` strictly above it.
///
/// A value already on a boundary still moves up one full cell.
pub fn round_up(value: f64, cell: f64) -> f64 {
    round_down(value, cell) + cell
}

/// Folds every trajectory's axis extents into the override-seeded bounds.
pub fn observed_extents(
    resolved: &[ResolvedTrajectory<'_>],
    config: &QuantizationConfig,
) -> Result<Extents, SsgError> {
    let first = resolved.first().ok_or_else(|| {
        SsgError::EmptyInput(ErrorInfo::new("no-trajectories", "bounds need at least one trajectory"))
    })?;
    if let Some(empty) = resolved.iter().find(|r| r.states.is_empty()) {
        return Err(SsgError::degenerate_trajectory(
            empty.source.id(),
            "no-observations",
            "trajectory has no observations",
        ));
    }

    let (seed_x, seed_y) = (first.states.x[0], first.states.y[0]);
    let mut extents = Extents {
        x_min: config.x_min.unwrap_or(seed_x),
        y_min: config.y_min.unwrap_or(seed_y),
        x_max: config.x_max.unwrap_or(seed_x),
        y_max: config.y_max.unwrap_or(seed_y),
    };
    for traj in resolved {
        if let Some((lo, hi)) = config.x_axis.extent(&traj.states.x) {
            extents.x_min = extents.x_min.min(lo);
            extents.x_max = extents.x_max.max(hi);
        }
        if let Some((lo, hi)) = config.y_axis.extent(&traj.states.y) {
            extents.y_min = extents.y_min.min(lo);
            extents.y_max = extents.y_max.max(hi);
        }
    }
    Ok(extents)
}

/// Resolves cell sizes and rounds the extents outward to whole cells.
pub fn resolve_bounds(extents: &Extents, config: &QuantizationConfig) -> Result<GridBounds, SsgError> {
    let cell_size_x = match config.cell_size_x {
        Some(cell) => cell,
        None => scale(Axis::X, extents.x_max - extents.x_min)?,
    };
    let cell_size_y = match config.cell_size_y {
        Some(cell) => cell,
        None => scale(Axis::Y, extents.y_max - extents.y_min)?,
    };
    let bounds = GridBounds {
        cell_size_x,
        cell_size_y,
        min_x: round_down(extents.x_min, cell_size_x),
        min_y: round_down(extents.y_min, cell_size_y),
        max_x: round_up(extents.x_max, cell_size_x),
        max_y: round_up(extents.y_max, cell_size_y),
    };
    let total_cells = bounds.total_cells()?;
    debug!(?extents, ?bounds, total_cells, "resolved grid bounds");
    Ok(bounds)
}
