//! Axis model and the resolver that maps raw states onto comparable positions.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{Axis, ErrorInfo, SsgError};

/// Raw state recorded on one axis of an observation.
///
/// Serialized untagged: strings decode as categorical labels, numbers as
/// numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// Ordinal or continuous value used directly as a coordinate.
    Numeric(f64),
    /// Member of a declared categorical domain.
    Category(String),
}

impl AxisValue {
    /// Convenience constructor for categorical labels.
    pub fn category(label: impl Into<String>) -> Self {
        AxisValue::Category(label.into())
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Numeric(value)
    }
}

impl From<&str> for AxisValue {
    fn from(label: &str) -> Self {
        AxisValue::Category(label.to_string())
    }
}

impl Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Numeric(value) => write!(f, "{value}"),
            AxisValue::Category(label) => f.write_str(label),
        }
    }
}

/// How an axis interprets its raw values, decided once at configuration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisKind {
    /// Values are used directly as coordinates.
    #[default]
    Numeric,
    /// Values are looked up in `ordering`; the position in the list is the coordinate.
    Categorical {
        /// Distinct labels in display order.
        ordering: Vec<AxisValue>,
    },
}

impl AxisKind {
    /// Builds a categorical axis from string labels.
    pub fn categorical<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AxisKind::Categorical {
            ordering: labels
                .into_iter()
                .map(|label| AxisValue::Category(label.into()))
                .collect(),
        }
    }

    /// Returns the declared ordering for categorical axes.
    pub fn ordering(&self) -> Option<&[AxisValue]> {
        match self {
            AxisKind::Numeric => None,
            AxisKind::Categorical { ordering } => Some(ordering),
        }
    }

    /// Checks that a categorical ordering is non-empty and free of duplicates.
    pub fn validate(&self, axis: Axis) -> Result<(), SsgError> {
        let Some(ordering) = self.ordering() else {
            return Ok(());
        };
        if ordering.is_empty() {
            return Err(SsgError::degenerate_axis(
                axis,
                "empty-ordering",
                "categorical axis declares no labels",
            ));
        }
        let mut seen = BTreeSet::new();
        for value in ordering {
            if !seen.insert(value.to_string()) {
                let info = ErrorInfo::new("duplicate-label", "categorical ordering repeats a label")
                    .with_context("axis", axis.name())
                    .with_context("label", value.to_string());
                return Err(SsgError::DegenerateAxis(info));
            }
        }
        Ok(())
    }

    /// Resolves a single raw value into its coordinate on this axis.
    pub fn position(&self, axis: Axis, value: &AxisValue) -> Result<f64, SsgError> {
        match (self, value) {
            (AxisKind::Numeric, AxisValue::Numeric(v)) => Ok(*v),
            (AxisKind::Numeric, AxisValue::Category(label)) => {
                let info = ErrorInfo::new("label-on-numeric-axis", "numeric axis received a label")
                    .with_context("axis", axis.name())
                    .with_context("value", label.clone())
                    .with_hint("declare a categorical ordering for this axis");
                Err(SsgError::UnknownCategory(info))
            }
            (AxisKind::Categorical { ordering }, value) => ordering
                .iter()
                .position(|candidate| candidate == value)
                .map(|idx| idx as f64)
                .ok_or_else(|| {
                    let info = ErrorInfo::new("unknown-category", "value missing from axis ordering")
                        .with_context("axis", axis.name())
                        .with_context("value", value.to_string());
                    SsgError::UnknownCategory(info)
                }),
        }
    }

    /// Maps every raw value to its coordinate (`ordering.index(value)` or identity).
    pub fn reindex(&self, axis: Axis, values: &[AxisValue]) -> Result<Vec<f64>, SsgError> {
        values.iter().map(|value| self.position(axis, value)).collect()
    }

    /// Returns `(min, max)` extents for already resolved coordinates.
    ///
    /// Categorical axes always claim their full declared domain `[0, len)`,
    /// whatever subset of labels occurs. Numeric axes return
    /// `(floor(min), ceil(max))`, or `None` when `resolved` is empty.
    pub fn extent(&self, resolved: &[f64]) -> Option<(f64, f64)> {
        match self {
            AxisKind::Categorical { ordering } => Some((0.0, ordering.len() as f64)),
            AxisKind::Numeric => {
                let mut iter = resolved.iter().copied();
                let first = iter.next()?;
                let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
                Some((min.floor(), max.ceil()))
            }
        }
    }
}
