//! Trajectory contract consumed by the grid and an in-memory implementation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::axis::{AxisKind, AxisValue};
use crate::errors::{Axis, ErrorInfo, SsgError};

/// Resolved, visit-merged view of a trajectory on a configured pair of axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StateSequence {
    /// Resolved x coordinate of every visit.
    pub x: Vec<f64>,
    /// Resolved y coordinate of every visit.
    pub y: Vec<f64>,
    /// Onset timestamp of every visit.
    pub t: Vec<f64>,
    /// Indices into the sequence of visits that absorbed a self-transition.
    pub loops: Vec<usize>,
}

impl StateSequence {
    /// Number of visits in the sequence.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true when the sequence holds no visits.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Behaviour the grid requires from a single subject's time series.
pub trait Trajectory {
    /// Identifier reported back in measures and diagnostics.
    fn id(&self) -> &str;

    /// Number of raw observations.
    fn event_count(&self) -> usize;

    /// Timestamps of the raw observations, non-decreasing.
    fn timestamps(&self) -> &[f64];

    /// Resolves both axes and merges adjacent repeated states into visits.
    fn states(&self, x_axis: &AxisKind, y_axis: &AxisKind) -> Result<StateSequence, SsgError>;

    /// Number of visits, i.e. runs of identical consecutive states.
    fn num_visits(&self) -> usize;

    /// Number of distinct states visited.
    fn cell_range(&self) -> usize;

    /// Dispersion of time across `total_cells` grid cells, in `[0, 1]`.
    fn dispersion(&self, total_cells: u64) -> f64;

    /// Elapsed time between the first and last observation.
    fn duration(&self) -> f64 {
        match (self.timestamps().first(), self.timestamps().last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// One observation: an x state, a y state and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(AxisValue, AxisValue, f64)", into = "(AxisValue, AxisValue, f64)")]
pub struct Observation {
    /// State on the horizontal axis.
    pub x: AxisValue,
    /// State on the vertical axis.
    pub y: AxisValue,
    /// Time at which the state was entered.
    pub t: f64,
}

impl Observation {
    /// Creates an observation from anything convertible into axis values.
    pub fn new(x: impl Into<AxisValue>, y: impl Into<AxisValue>, t: f64) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            t,
        }
    }
}

impl From<(AxisValue, AxisValue, f64)> for Observation {
    fn from((x, y, t): (AxisValue, AxisValue, f64)) -> Self {
        Self { x, y, t }
    }
}

impl From<Observation> for (AxisValue, AxisValue, f64) {
    fn from(obs: Observation) -> Self {
        (obs.x, obs.y, obs.t)
    }
}

/// Serialized form of a [`StateTrajectory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Trajectory identifier.
    pub id: String,
    /// Observations in time order.
    pub states: Vec<Observation>,
}

/// Immutable in-memory trajectory validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryRecord", into = "TrajectoryRecord")]
pub struct StateTrajectory {
    id: String,
    x: Vec<AxisValue>,
    y: Vec<AxisValue>,
    t: Vec<f64>,
}

impl StateTrajectory {
    /// Builds a trajectory from time-ordered observations.
    ///
    /// An empty observation list is accepted; analyses reject it later with
    /// [`SsgError::DegenerateTrajectory`].
    pub fn new(id: impl Into<String>, observations: Vec<Observation>) -> Result<Self, SsgError> {
        let id = id.into();
        let mut x = Vec::with_capacity(observations.len());
        let mut y = Vec::with_capacity(observations.len());
        let mut t = Vec::with_capacity(observations.len());
        for (idx, obs) in observations.into_iter().enumerate() {
            if !obs.t.is_finite() {
                return Err(invalid(&id, idx, "non-finite-timestamp", "timestamp is not finite"));
            }
            if let Some(prev) = t.last() {
                if obs.t < *prev {
                    return Err(invalid(&id, idx, "decreasing-timestamp", "timestamps must not decrease"));
                }
            }
            for (axis, value) in [(Axis::X, &obs.x), (Axis::Y, &obs.y)] {
                if let AxisValue::Numeric(v) = value {
                    if !v.is_finite() {
                        let err = invalid(&id, idx, "non-finite-state", "numeric state is not finite");
                        return Err(err.with_context("axis", axis.name()));
                    }
                }
            }
            x.push(obs.x);
            y.push(obs.y);
            t.push(obs.t);
        }
        Ok(Self { id, x, y, t })
    }

    /// Builds a trajectory from parallel sequences.
    pub fn from_parts(
        id: impl Into<String>,
        x: Vec<AxisValue>,
        y: Vec<AxisValue>,
        t: Vec<f64>,
    ) -> Result<Self, SsgError> {
        let id = id.into();
        if x.len() != y.len() || x.len() != t.len() {
            let info = ErrorInfo::new("length-mismatch", "x, y and t must have equal lengths")
                .with_context("trajectory", id.clone())
                .with_context("x", x.len().to_string())
                .with_context("y", y.len().to_string())
                .with_context("t", t.len().to_string());
            return Err(SsgError::InvalidTrajectory(info));
        }
        let observations = x
            .into_iter()
            .zip(y)
            .zip(t)
            .map(|((x, y), t)| Observation { x, y, t })
            .collect();
        Self::new(id, observations)
    }

    /// Raw x states in observation order.
    pub fn data_x(&self) -> &[AxisValue] {
        &self.x
    }

    /// Raw y states in observation order.
    pub fn data_y(&self) -> &[AxisValue] {
        &self.y
    }

    fn keys(&self) -> impl Iterator<Item = (StateKey, StateKey)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(x, y)| (StateKey::from(x), StateKey::from(y)))
    }
}

impl TryFrom<TrajectoryRecord> for StateTrajectory {
    type Error = SsgError;

    fn try_from(record: TrajectoryRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.states)
    }
}

impl From<StateTrajectory> for TrajectoryRecord {
    fn from(traj: StateTrajectory) -> Self {
        let states = traj
            .x
            .into_iter()
            .zip(traj.y)
            .zip(traj.t)
            .map(|((x, y), t)| Observation { x, y, t })
            .collect();
        TrajectoryRecord { id: traj.id, states }
    }
}

impl Trajectory for StateTrajectory {
    fn id(&self) -> &str {
        &self.id
    }

    fn event_count(&self) -> usize {
        self.t.len()
    }

    fn timestamps(&self) -> &[f64] {
        &self.t
    }

    fn states(&self, x_axis: &AxisKind, y_axis: &AxisKind) -> Result<StateSequence, SsgError> {
        let xs = x_axis
            .reindex(Axis::X, &self.x)
            .map_err(|err| err.with_context("trajectory", &self.id))?;
        let ys = y_axis
            .reindex(Axis::Y, &self.y)
            .map_err(|err| err.with_context("trajectory", &self.id))?;

        let mut seq = StateSequence::default();
        for ((x, y), t) in xs.into_iter().zip(ys).zip(self.t.iter().copied()) {
            let repeated = matches!((seq.x.last(), seq.y.last()), (Some(px), Some(py)) if *px == x && *py == y);
            if repeated {
                seq.loops.push(seq.x.len() - 1);
            } else {
                seq.x.push(x);
                seq.y.push(y);
                seq.t.push(t);
            }
        }
        Ok(seq)
    }

    fn num_visits(&self) -> usize {
        let mut visits = 0;
        let mut previous = None;
        for key in self.keys() {
            if previous.as_ref() != Some(&key) {
                visits += 1;
            }
            previous = Some(key);
        }
        visits
    }

    fn cell_range(&self) -> usize {
        self.keys().collect::<BTreeSet<_>>().len()
    }

    fn dispersion(&self, total_cells: u64) -> f64 {
        let total = self.duration();
        if total <= 0.0 || total_cells <= 1 {
            return 0.0;
        }
        let mut per_cell: BTreeMap<(StateKey, StateKey), f64> = BTreeMap::new();
        let next_onsets = self.t.iter().skip(1).map(Some).chain(std::iter::once(None));
        for ((key, onset), next) in self.keys().zip(&self.t).zip(next_onsets) {
            let spent = next.map_or(0.0, |next| next - onset);
            *per_cell.entry(key).or_insert(0.0) += spent;
        }
        let n = total_cells as f64;
        let concentration: f64 = per_cell.values().map(|d| (d / total).powi(2)).sum();
        1.0 - (n * concentration - 1.0) / (n - 1.0)
    }
}

/// Totally ordered identity for raw states.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum StateKey {
    Numeric(u64),
    Category(String),
}

impl From<&AxisValue> for StateKey {
    fn from(value: &AxisValue) -> Self {
        match value {
            // -0.0 and 0.0 are the same state.
            AxisValue::Numeric(v) => StateKey::Numeric((v + 0.0).to_bits()),
            AxisValue::Category(label) => StateKey::Category(label.clone()),
        }
    }
}

fn invalid(id: &str, index: usize, code: &str, message: &str) -> SsgError {
    let info = ErrorInfo::new(code, message)
        .with_context("trajectory", id)
        .with_context("index", index.to_string());
    SsgError::InvalidTrajectory(info)
}
