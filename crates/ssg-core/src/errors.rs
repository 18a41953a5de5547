//! Structured error types shared across SSG crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SsgError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (trajectory ids, axis names, values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for state-space grid analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SsgError {
    /// A value was not found in the ordering declared for its axis.
    #[error("unknown category: {0}")]
    UnknownCategory(ErrorInfo),
    /// An aggregate was requested over zero trajectories.
    #[error("empty input: {0}")]
    EmptyInput(ErrorInfo),
    /// A trajectory cannot supply a required non-zero quantity.
    #[error("degenerate trajectory: {0}")]
    DegenerateTrajectory(ErrorInfo),
    /// An axis range or cell size cannot be quantized.
    #[error("degenerate axis: {0}")]
    DegenerateAxis(ErrorInfo),
    /// Trajectory data violates the construction contract.
    #[error("invalid trajectory: {0}")]
    InvalidTrajectory(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SsgError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SsgError::UnknownCategory(info)
            | SsgError::EmptyInput(info)
            | SsgError::DegenerateTrajectory(info)
            | SsgError::DegenerateAxis(info)
            | SsgError::InvalidTrajectory(info)
            | SsgError::Serde(info) => info,
        }
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            SsgError::UnknownCategory(info) => SsgError::UnknownCategory(info.with_context(key, value)),
            SsgError::EmptyInput(info) => SsgError::EmptyInput(info.with_context(key, value)),
            SsgError::DegenerateTrajectory(info) => {
                SsgError::DegenerateTrajectory(info.with_context(key, value))
            }
            SsgError::DegenerateAxis(info) => SsgError::DegenerateAxis(info.with_context(key, value)),
            SsgError::InvalidTrajectory(info) => {
                SsgError::InvalidTrajectory(info.with_context(key, value))
            }
            SsgError::Serde(info) => SsgError::Serde(info.with_context(key, value)),
        }
    }

    /// Shorthand for a [`SsgError::DegenerateTrajectory`] naming the trajectory.
    pub fn degenerate_trajectory(id: &str, code: &str, message: impl Into<String>) -> Self {
        SsgError::DegenerateTrajectory(ErrorInfo::new(code, message).with_context("trajectory", id))
    }

    /// Shorthand for a [`SsgError::DegenerateAxis`] naming the axis.
    pub fn degenerate_axis(axis: Axis, code: &str, message: impl Into<String>) -> Self {
        SsgError::DegenerateAxis(ErrorInfo::new(code, message).with_context("axis", axis.name()))
    }
}

/// Names one of the two grid axes in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Lowercase label used in error context.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}
