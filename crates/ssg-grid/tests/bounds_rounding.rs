mod common;

use common::{abc_batch, numeric, trajectory};
use proptest::prelude::*;
use ssg_core::{AxisKind, SsgError, StateTrajectory};
use ssg_grid::{Grid, GridBounds, QuantizationConfig};

fn bounds_of(batch: &[StateTrajectory], config: QuantizationConfig) -> GridBounds {
    Grid::from_slice(batch, config).unwrap().bounds().unwrap()
}

#[test]
fn categorical_axis_spans_declared_domain() {
    let ordering = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let batch = vec![trajectory("only-c", vec![("c", 0.0, 0.0), ("c", 1.0, 1.0)])];
    let config = QuantizationConfig::default()
        .with_axes(AxisKind::categorical(ordering), AxisKind::Numeric)
        .with_cell_size(1.0, 1.0);
    let grid = Grid::from_slice(&batch, config).unwrap();
    let resolved = grid.resolve().unwrap();
    let extents = ssg_grid::observed_extents(&resolved, grid.quantization()).unwrap();
    assert_eq!((extents.x_min, extents.x_max), (0.0, 10.0));
    let bounds = grid.bounds().unwrap();
    assert_eq!((bounds.min_x, bounds.max_x), (0.0, 11.0));
}

#[test]
fn upper_bound_on_a_boundary_advances_one_cell() {
    let (batch, config) = abc_batch();
    let bounds = bounds_of(&batch, config);
    assert_eq!(bounds.min_x, 0.0);
    assert_eq!(bounds.max_x, 4.0);
    assert_eq!(bounds.min_y, 0.0);
    assert_eq!(bounds.max_y, 3.0);
    assert_eq!(bounds.total_cells().unwrap(), 20);
}

#[test]
fn fine_cells_on_a_wide_range_report_too_many_cells() {
    let batch = vec![numeric("sprawl", &[(0.0, 0.0), (1e6, 1e6)])];
    let config = QuantizationConfig::default().with_cell_size(1e-4, 1e-4);
    let grid = Grid::from_slice(&batch, config).unwrap();
    for err in [grid.measures().unwrap_err(), grid.layout().unwrap_err()] {
        assert!(matches!(err, SsgError::DegenerateAxis(_)));
        assert_eq!(err.info().code, "too-many-cells");
    }
}

#[test]
fn cell_count_overflow_on_one_axis_names_the_axis() {
    let bounds = GridBounds {
        cell_size_x: 1.0,
        cell_size_y: f64::MIN_POSITIVE,
        min_x: 0.0,
        min_y: 0.0,
        max_x: 3.0,
        max_y: 1.0,
    };
    assert_eq!(bounds.columns().unwrap(), 4);
    let err = bounds.rows().unwrap_err();
    assert_eq!(err.info().code, "too-many-cells");
    assert_eq!(err.info().context.get("axis").map(String::as_str), Some("y"));
    assert!(bounds.total_cells().is_err());
}

#[test]
fn auto_cell_size_follows_axis_range() {
    let batch = vec![numeric("wide", &[(0.0, 0.0), (250.0, 3.0)])];
    let bounds = bounds_of(&batch, QuantizationConfig::default());
    assert_eq!(bounds.cell_size_x, 100.0);
    assert_eq!(bounds.cell_size_y, 1.0);
    assert_eq!((bounds.min_x, bounds.max_x), (0.0, 300.0));
}

#[test]
fn single_value_axis_uses_unit_cell() {
    let batch = vec![numeric("still", &[(4.0, 7.0), (4.0, 7.0)])];
    let bounds = bounds_of(&batch, QuantizationConfig::default());
    assert_eq!(bounds.cell_size_x, 1.0);
    assert_eq!((bounds.min_x, bounds.max_x), (4.0, 5.0));
}

#[test]
fn overrides_seed_each_bound_independently() {
    let batch = vec![numeric("mid", &[(5.0, 5.0), (6.0, 6.0)])];
    let config = QuantizationConfig {
        x_min: Some(-10.0),
        y_max: Some(20.0),
        cell_size_x: Some(1.0),
        cell_size_y: Some(1.0),
        ..QuantizationConfig::default()
    };
    let bounds = bounds_of(&batch, config);
    assert_eq!(bounds.min_x, -10.0);
    assert_eq!(bounds.max_x, 7.0);
    assert_eq!(bounds.min_y, 5.0);
    assert_eq!(bounds.max_y, 21.0);
}

#[test]
fn overrides_never_narrow_the_data() {
    let batch = vec![numeric("big", &[(0.0, 0.0), (50.0, 50.0)])];
    let config = QuantizationConfig {
        x_max: Some(10.0),
        cell_size_x: Some(10.0),
        cell_size_y: Some(10.0),
        ..QuantizationConfig::default()
    };
    let bounds = bounds_of(&batch, config);
    assert_eq!(bounds.max_x, 60.0);
}

#[test]
fn invalid_cell_size_is_rejected_at_construction() {
    let (batch, config) = abc_batch();
    let config = config.with_cell_size(0.0, 1.0);
    let err = Grid::from_slice(&batch, config).err().expect("must fail");
    assert!(matches!(err, SsgError::DegenerateAxis(_)));
    assert_eq!(err.info().context.get("axis").map(String::as_str), Some("x"));
}

#[test]
fn empty_batch_is_empty_input() {
    let batch: Vec<StateTrajectory> = Vec::new();
    let err = Grid::from_slice(&batch, QuantizationConfig::default())
        .unwrap()
        .bounds()
        .unwrap_err();
    assert!(matches!(err, SsgError::EmptyInput(_)));
}

#[test]
fn empty_trajectory_is_degenerate() {
    let batch = vec![numeric("ok", &[(1.0, 1.0)]), StateTrajectory::new("hollow", Vec::new()).unwrap()];
    let err = Grid::from_slice(&batch, QuantizationConfig::default())
        .unwrap()
        .bounds()
        .unwrap_err();
    assert!(matches!(err, SsgError::DegenerateTrajectory(_)));
    assert_eq!(err.info().context.get("trajectory").map(String::as_str), Some("hollow"));
}

fn is_multiple(value: f64, cell: f64) -> bool {
    let ratio = value / cell;
    (ratio - ratio.round()).abs() < 1e-9
}

proptest! {
    #[test]
    fn rounded_bounds_enclose_data_and_always_advance(
        points in prop::collection::vec((-200i32..200, -200i32..200), 1..20),
        halves in any::<bool>(),
    ) {
        let scale = if halves { 0.5 } else { 1.0 };
        let points: Vec<(f64, f64)> = points
            .iter()
            .map(|(x, y)| (*x as f64 * scale, *y as f64 * scale))
            .collect();
        let batch = vec![numeric("prop", &points)];
        let grid = Grid::from_slice(&batch, QuantizationConfig::default()).unwrap();
        let resolved = grid.resolve().unwrap();
        let extents = ssg_grid::observed_extents(&resolved, grid.quantization()).unwrap();
        let bounds = grid.bounds().unwrap();

        prop_assert!(bounds.min_x <= extents.x_min);
        prop_assert!(bounds.min_y <= extents.y_min);
        prop_assert!(bounds.max_x > extents.x_max);
        prop_assert!(bounds.max_y > extents.y_max);
        prop_assert!(bounds.max_x - extents.x_max <= bounds.cell_size_x);
        prop_assert!(bounds.max_y - extents.y_max <= bounds.cell_size_y);
        for (value, cell) in [
            (bounds.min_x, bounds.cell_size_x),
            (bounds.max_x, bounds.cell_size_x),
            (bounds.min_y, bounds.cell_size_y),
            (bounds.max_y, bounds.cell_size_y),
        ] {
            prop_assert!(is_multiple(value, cell), "{} not a multiple of {}", value, cell);
        }
    }
}
