use ssg_core::{SsgError, StateSequence, Trajectory};
use tracing::debug;

use crate::bounds::{self, GridBounds};
use crate::config::QuantizationConfig;
use crate::layout::{self, GridLayout};
use crate::measures::{self, GridMeasures, TrajectoryMeasures};
use crate::overlap::{self, OffsetTrajectory};

/// A trajectory paired with its states resolved on the configured axes.
#[derive(Clone)]
pub struct ResolvedTrajectory<'a> {
    /// Borrowed source trajectory.
    pub source: &'a dyn Trajectory,
    /// Visit-merged, resolved states.
    pub states: StateSequence,
}

impl std::fmt::Debug for ResolvedTrajectory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedTrajectory")
            .field("id", &self.source.id())
            .field("states", &self.states)
            .finish()
    }
}

/// A batch of trajectories analysed under one quantization.
///
/// Nothing is cached: every call re-derives bounds and bins from the batch,
/// so results are a pure function of the trajectories and the config.
pub struct Grid<'a> {
    trajectories: Vec<&'a dyn Trajectory>,
    quantization: QuantizationConfig,
}

impl<'a> Grid<'a> {
    /// Creates a grid after validating the quantization settings.
    pub fn new(
        trajectories: Vec<&'a dyn Trajectory>,
        quantization: QuantizationConfig,
    ) -> Result<Self, SsgError> {
        quantization.validate()?;
        Ok(Self {
            trajectories,
            quantization,
        })
    }

    /// Creates a grid over a slice of concrete trajectories.
    pub fn from_slice<T: Trajectory>(
        trajectories: &'a [T],
        quantization: QuantizationConfig,
    ) -> Result<Self, SsgError> {
        let borrowed = trajectories.iter().map(|t| t as &dyn Trajectory).collect();
        Self::new(borrowed, quantization)
    }

    /// Quantization settings in effect.
    pub fn quantization(&self) -> &QuantizationConfig {
        &self.quantization
    }

    /// Borrowed trajectories in input order.
    pub fn trajectories(&self) -> &[&'a dyn Trajectory] {
        &self.trajectories
    }

    /// Resolves every trajectory's states on the configured axes.
    pub fn resolve(&self) -> Result<Vec<ResolvedTrajectory<'a>>, SsgError> {
        let x_axis = &self.quantization.x_axis;
        let y_axis = &self.quantization.y_axis;
        self.trajectories
            .iter()
            .map(|source| -> Result<ResolvedTrajectory<'a>, SsgError> {
                Ok(ResolvedTrajectory {
                    source: *source,
                    states: source.states(x_axis, y_axis)?,
                })
            })
            .collect()
    }

    /// Resolves cell sizes and rounded bounds for the batch.
    pub fn bounds(&self) -> Result<GridBounds, SsgError> {
        let resolved = self.resolve()?;
        self.bounds_for(&resolved)
    }

    fn bounds_for(&self, resolved: &[ResolvedTrajectory<'_>]) -> Result<GridBounds, SsgError> {
        let extents = bounds::observed_extents(resolved, &self.quantization)?;
        bounds::resolve_bounds(&extents, &self.quantization)
    }

    /// Computes the aggregate measures for the batch.
    pub fn measures(&self) -> Result<GridMeasures, SsgError> {
        self.measure_all().map(|(_, _, measures)| measures)
    }

    /// Computes the per-trajectory rows behind [`Grid::measures`].
    pub fn trajectory_measures(&self) -> Result<Vec<TrajectoryMeasures>, SsgError> {
        self.measure_all().map(|(_, rows, _)| rows)
    }

    /// Bounds, per-trajectory rows and aggregates from a single resolution pass.
    pub fn measure_all(
        &self,
    ) -> Result<(GridBounds, Vec<TrajectoryMeasures>, GridMeasures), SsgError> {
        let resolved = self.resolve()?;
        let bounds = self.bounds_for(&resolved)?;
        debug!(trajectories = resolved.len(), "computing grid measures");
        let (rows, measures) = measures::compute_measures(&resolved, &bounds)?;
        Ok((bounds, rows, measures))
    }

    /// Returns overlap-resolved coordinates for rendering.
    pub fn offset_trajectories(&self) -> Result<Vec<OffsetTrajectory>, SsgError> {
        let resolved = self.resolve()?;
        let bounds = self.bounds_for(&resolved)?;
        Ok(overlap::offset_trajectories(
            &resolved,
            bounds.cell_size_x,
            bounds.cell_size_y,
        ))
    }

    /// Assembles everything a renderer needs in one pass.
    pub fn layout(&self) -> Result<GridLayout, SsgError> {
        let resolved = self.resolve()?;
        let bounds = self.bounds_for(&resolved)?;
        layout::build_layout(&resolved, &bounds, &self.quantization)
    }
}
