#![deny(missing_docs)]
#![doc = "Core types for state-space grid analysis: errors, axis resolution and the trajectory contract."]

pub mod axis;
pub mod errors;
pub mod trajectory;

pub use axis::{AxisKind, AxisValue};
pub use errors::{Axis, ErrorInfo, SsgError};
pub use trajectory::{Observation, StateSequence, StateTrajectory, Trajectory, TrajectoryRecord};
