#![deny(missing_docs)]
#![doc = "Quantization, overlap resolution and aggregate measures for state-space grids."]

/// Cell keys and occurrence counting.
pub mod bins;
/// Cell size selection and whole-cell bounds.
pub mod bounds;
/// Quantization settings.
pub mod config;
/// Batch orchestration.
pub mod grid;
/// Stable hashing helpers.
pub mod hash;
/// Render-facing layout assembly.
pub mod layout;
/// Per-trajectory and aggregate measures.
pub mod measures;
/// Overlap resolution for coincident points.
pub mod overlap;
/// Canonical JSON and YAML helpers.
pub mod serde;

pub use bins::{bin_counts, BinCounts, Cell};
pub use bounds::{observed_extents, resolve_bounds, round_down, round_up, scale, Extents, GridBounds};
pub use config::QuantizationConfig;
pub use grid::{Grid, ResolvedTrajectory};
pub use hash::{batch_fingerprint, stable_hash_string};
pub use layout::{GridLayout, Tick};
pub use measures::{compute_measures, GridMeasures, TrajectoryMeasures};
pub use overlap::{offset_trajectories, OccupancyCounter, OffsetTrajectory, OFFSET_RADIUS};
pub use crate::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes, to_yaml_string};
