use serde::{Deserialize, Serialize};
use ssg_core::{Axis, AxisKind, ErrorInfo, SsgError};

/// Quantization settings applied to one analysis batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct QuantizationConfig {
    /// Fixed cell width; auto-selected from the x range when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_size_x: Option<f64>,
    /// Fixed cell height; auto-selected from the y range when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_size_y: Option<f64>,
    /// Interpretation of x states.
    pub x_axis: AxisKind,
    /// Interpretation of y states.
    pub y_axis: AxisKind,
    /// Seed for the lower x bound; data can still widen it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    /// Seed for the upper x bound; data can still widen it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
    /// Seed for the lower y bound; data can still widen it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    /// Seed for the upper y bound; data can still widen it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

impl QuantizationConfig {
    /// Fixes the cell size on both axes.
    pub fn with_cell_size(mut self, x: f64, y: f64) -> Self {
        self.cell_size_x = Some(x);
        self.cell_size_y = Some(y);
        self
    }

    /// Replaces both axis kinds.
    pub fn with_axes(mut self, x_axis: AxisKind, y_axis: AxisKind) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    /// Returns the axis kind configured for `axis`.
    pub fn axis(&self, axis: Axis) -> &AxisKind {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    /// Checks cell sizes, overrides and orderings before any data is touched.
    pub fn validate(&self) -> Result<(), SsgError> {
        for (axis, cell) in [(Axis::X, self.cell_size_x), (Axis::Y, self.cell_size_y)] {
            if let Some(cell) = cell {
                if !(cell.is_finite() && cell > 0.0) {
                    let info = ErrorInfo::new("invalid-cell-size", "cell size must be finite and positive")
                        .with_context("axis", axis.name())
                        .with_context("cell_size", cell.to_string());
                    return Err(SsgError::DegenerateAxis(info));
                }
            }
        }
        let overrides = [
            (Axis::X, "x_min", self.x_min),
            (Axis::X, "x_max", self.x_max),
            (Axis::Y, "y_min", self.y_min),
            (Axis::Y, "y_max", self.y_max),
        ];
        for (axis, name, value) in overrides {
            if matches!(value, Some(v) if !v.is_finite()) {
                return Err(SsgError::degenerate_axis(
                    axis,
                    "invalid-bound-override",
                    format!("{name} override is not finite"),
                ));
            }
        }
        self.x_axis.validate(Axis::X)?;
        self.y_axis.validate(Axis::Y)
    }
}
