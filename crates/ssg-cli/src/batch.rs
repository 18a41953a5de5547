//! Batch files: a quantization config plus the trajectories to analyse.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ssg_core::{ErrorInfo, SsgError, StateTrajectory};
use ssg_grid::serde::Format;
use ssg_grid::{Grid, QuantizationConfig};
use tracing::debug;

/// Complete in-memory input for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Batch {
    /// Quantization applied to every trajectory.
    #[serde(default)]
    pub quantization: QuantizationConfig,
    /// Trajectories in analysis order.
    pub trajectories: Vec<StateTrajectory>,
}

impl Batch {
    /// Borrows the batch as a grid.
    pub fn grid(&self) -> Result<Grid<'_>, SsgError> {
        Grid::from_slice(&self.trajectories, self.quantization.clone())
    }
}

/// Loads a batch, choosing YAML or JSON from the file extension.
pub fn load_batch(path: &Path) -> Result<Batch, SsgError> {
    let data = fs::read(path).map_err(|err| {
        SsgError::Serde(
            ErrorInfo::new("batch_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let batch: Batch = Format::from_path(path)?
        .decode(&data)
        .map_err(|err| err.with_context("path", path.display().to_string()))?;
    debug!(
        path = %path.display(),
        trajectories = batch.trajectories.len(),
        "loaded batch"
    );
    Ok(batch)
}
