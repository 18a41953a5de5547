use ssg_core::{AxisKind, AxisValue, Observation, SsgError, StateTrajectory, Trajectory};

fn mood_walk() -> StateTrajectory {
    StateTrajectory::new(
        "dyad-1",
        vec![
            Observation::new("calm", 0.0, 0.0),
            Observation::new("upset", 1.0, 1.0),
            Observation::new("calm", 0.0, 2.0),
            Observation::new("calm", 0.0, 4.0),
        ],
    )
    .unwrap()
}

#[test]
fn states_merge_repeats_and_record_loops() {
    let traj = mood_walk();
    let seq = traj
        .states(&AxisKind::categorical(["calm", "upset"]), &AxisKind::Numeric)
        .unwrap();
    assert_eq!(seq.x, vec![0.0, 1.0, 0.0]);
    assert_eq!(seq.y, vec![0.0, 1.0, 0.0]);
    assert_eq!(seq.t, vec![0.0, 1.0, 2.0]);
    assert_eq!(seq.loops, vec![2]);
}

#[test]
fn visits_and_cell_range_count_runs_and_distinct_states() {
    let traj = mood_walk();
    assert_eq!(traj.event_count(), 4);
    assert_eq!(traj.num_visits(), 3);
    assert_eq!(traj.cell_range(), 2);
    assert_eq!(traj.duration(), 4.0);
}

#[test]
fn dispersion_follows_time_share_per_cell() {
    let traj = mood_walk();
    // calm holds 3 of 4 time units, upset holds 1.
    let value = traj.dispersion(4);
    assert!((value - 0.5).abs() < 1e-12, "dispersion {value}");
}

#[test]
fn dispersion_is_zero_for_degenerate_inputs() {
    let traj = mood_walk();
    assert_eq!(traj.dispersion(1), 0.0);
    let instant = StateTrajectory::new("flat", vec![Observation::new(1.0, 1.0, 5.0)]).unwrap();
    assert_eq!(instant.dispersion(9), 0.0);
}

#[test]
fn states_propagate_unknown_category_with_trajectory_id() {
    let traj = mood_walk();
    let err = traj
        .states(&AxisKind::categorical(["calm"]), &AxisKind::Numeric)
        .unwrap_err();
    assert!(matches!(err, SsgError::UnknownCategory(_)));
    assert_eq!(err.info().context.get("trajectory").map(String::as_str), Some("dyad-1"));
}

#[test]
fn construction_rejects_decreasing_timestamps() {
    let err = StateTrajectory::new(
        "bad",
        vec![Observation::new(0.0, 0.0, 2.0), Observation::new(1.0, 1.0, 1.0)],
    )
    .unwrap_err();
    assert_eq!(err.info().code, "decreasing-timestamp");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("1"));
}

#[test]
fn construction_rejects_non_finite_states() {
    let err = StateTrajectory::new("nan", vec![Observation::new(0.0, f64::NAN, 0.0)]).unwrap_err();
    assert!(matches!(err, SsgError::InvalidTrajectory(_)));
    assert_eq!(err.info().context.get("axis").map(String::as_str), Some("y"));
}

#[test]
fn from_parts_checks_lengths() {
    let err = StateTrajectory::from_parts(
        "short",
        vec![AxisValue::Numeric(0.0)],
        vec![],
        vec![0.0],
    )
    .unwrap_err();
    assert_eq!(err.info().code, "length-mismatch");
}

#[test]
fn empty_trajectory_is_constructible() {
    let traj = StateTrajectory::new("empty", Vec::new()).unwrap();
    assert_eq!(traj.event_count(), 0);
    assert_eq!(traj.num_visits(), 0);
    assert_eq!(traj.duration(), 0.0);
}

#[test]
fn trajectory_decodes_from_tuple_states() {
    let json = r#"{"id":"p2","states":[["A",0.5,0.0],["C",1.5,1.0]]}"#;
    let traj: StateTrajectory = serde_json::from_str(json).unwrap();
    assert_eq!(traj.id(), "p2");
    assert_eq!(traj.data_x(), &[AxisValue::category("A"), AxisValue::category("C")]);
    assert_eq!(serde_json::to_string(&traj).unwrap(), json);
}

#[test]
fn trajectory_decode_validates() {
    let json = r#"{"id":"p3","states":[["A",0,3.0],["A",0,1.0]]}"#;
    assert!(serde_json::from_str::<StateTrajectory>(json).is_err());
}

mod properties {
    use proptest::prelude::*;
    use ssg_core::{AxisKind, Observation, StateTrajectory, Trajectory};

    proptest! {
        #[test]
        fn visits_match_merged_states(points in prop::collection::vec((0i32..3, 0i32..3), 1..30)) {
            let observations = points
                .iter()
                .enumerate()
                .map(|(idx, (x, y))| Observation::new(*x as f64, *y as f64, idx as f64))
                .collect();
            let traj = StateTrajectory::new("prop", observations).unwrap();
            let seq = traj.states(&AxisKind::Numeric, &AxisKind::Numeric).unwrap();
            prop_assert_eq!(seq.len(), traj.num_visits());
            prop_assert_eq!(seq.len() + seq.loops.len(), traj.event_count());
            prop_assert!(traj.cell_range() <= traj.num_visits());
            let dispersion = traj.dispersion(9);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&dispersion));
        }
    }
}
