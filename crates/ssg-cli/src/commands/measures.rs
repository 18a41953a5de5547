use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};
use ssg_grid::{batch_fingerprint, GridBounds, GridMeasures, TrajectoryMeasures};
use tracing::info;

use crate::batch::load_batch;

#[derive(Args, Debug)]
pub struct MeasuresArgs {
    /// Batch file (YAML or JSON) holding the quantization and trajectories.
    #[arg(long)]
    pub input: PathBuf,
    /// Output path for the JSON report; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Report written by `ssg measures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuresReport {
    /// Hash of the canonical batch the report was computed from.
    pub input_hash: String,
    /// Bounds the measures were computed against.
    pub bounds: GridBounds,
    /// Aggregate measures.
    pub measures: GridMeasures,
    /// Per-trajectory rows in input order.
    pub trajectories: Vec<TrajectoryMeasures>,
}

pub fn build_report(args: &MeasuresArgs) -> Result<MeasuresReport, Box<dyn Error>> {
    let batch = load_batch(&args.input)?;
    let (bounds, trajectories, measures) = batch.grid()?.measure_all()?;
    let report = MeasuresReport {
        input_hash: batch_fingerprint(&batch.quantization, &batch.trajectories)?,
        bounds,
        measures,
        trajectories,
    };
    info!(
        trajectories = report.trajectories.len(),
        overall_cell_range = report.measures.overall_cell_range,
        "measures computed"
    );
    Ok(report)
}

pub fn run(args: &MeasuresArgs) -> Result<(), Box<dyn Error>> {
    let report = build_report(args)?;
    super::write_output(&report, args.out.as_deref())
}
