//! Integration tests for the Pareto front through the public API.

#[allow(dead_code)]
mod common;

use common::Identity;
use mosqp::{ParetoFront, Point, Tolerances};

fn point(a: f64, b: f64) -> Point {
    Point::new(vec![a, b], &Identity).unwrap()
}

fn front_with(max_points: usize, seeds: &[(f64, f64)]) -> ParetoFront {
    ParetoFront::new(
        max_points,
        2,
        Tolerances::default(),
        seeds.iter().map(|&(a, b)| point(a, b)).collect(),
    )
}

fn objective_pairs(front: &ParetoFront) -> Vec<(f64, f64)> {
    front
        .iter()
        .map(|p| (p.objective(0), p.objective(1)))
        .collect()
}

#[test]
fn seeding_ignores_domination() {
    let front = front_with(10, &[(1.0, 1.0), (2.0, 2.0)]);
    assert_eq!(front.len(), 2);
    assert!(!front.all_non_dominated());
}

#[test]
fn dominated_candidate_is_discarded() {
    let mut front = front_with(10, &[(1.0, 1.0)]);
    assert!(!front.add_point(point(2.0, 2.0)));
    assert_eq!(front.len(), 1);
    assert_eq!(objective_pairs(&front), vec![(1.0, 1.0)]);
}

#[test]
fn dominating_candidate_removes_its_victims() {
    let mut front = front_with(10, &[(3.0, 3.0), (1.0, 6.0), (4.0, 4.0)]);
    assert!(front.add_point(point(2.0, 2.0)));

    assert_eq!(front.len(), 2);
    let pairs = objective_pairs(&front);
    assert!(pairs.contains(&(2.0, 2.0)));
    assert!(pairs.contains(&(1.0, 6.0)));
    assert!(front.all_non_dominated());
}

#[test]
fn over_capacity_seeding_evicts_by_crowding() {
    // Five mutually comparable seeds against a capacity of three: cleanup
    // evicts the most crowded interior points, one at a time, and always
    // keeps the per-objective extremes.
    let front = front_with(
        3,
        &[(1.0, 5.0), (2.0, 4.0), (3.0, 3.0), (4.0, 2.0), (2.5, 2.5)],
    );

    assert_eq!(front.len(), 3);
    let pairs = objective_pairs(&front);
    assert!(pairs.contains(&(1.0, 5.0)));
    assert!(pairs.contains(&(4.0, 2.0)));
}

#[test]
fn batch_insert_reports_the_inserted_count() {
    let mut front = front_with(10, &[(1.0, 1.0)]);
    let added = front.add_points(vec![
        point(2.0, 2.0), // dominated by (1, 1)
        point(0.5, 3.0), // incomparable, goes in
        point(3.0, 0.5), // incomparable, goes in
    ]);
    assert_eq!(added, 2);
    assert_eq!(front.len(), 3);
}

#[test]
fn remove_returns_the_following_position() {
    let mut front = front_with(10, &[(1.0, 5.0), (3.0, 3.0), (5.0, 1.0)]);
    let next = front.remove_point(0);
    assert_eq!(next, 0);
    assert_eq!(front.len(), 2);
    assert_eq!(front[0].objective(0), 3.0);
}

#[test]
fn stop_bookkeeping_over_the_whole_front() {
    let front = front_with(10, &[(1.0, 5.0), (5.0, 1.0)]);
    assert!(!front.all_stopped());
    for p in &front {
        p.set_stopped(true);
    }
    assert!(front.all_stopped());
    front.unstop_all();
    assert!(!front.all_stopped());
}

#[test]
fn snapshot_writers_emit_one_row_per_point() {
    let front = front_with(10, &[(1.0, 5.0), (5.0, 1.0)]);

    let mut x_buffer = Vec::new();
    front.write_x(&mut x_buffer).unwrap();
    assert_eq!(String::from_utf8(x_buffer).unwrap(), "1 5 \n5 1 \n\n");

    let mut f_buffer = Vec::new();
    front.write_f(&mut f_buffer).unwrap();
    assert_eq!(String::from_utf8(f_buffer).unwrap(), "1 5 \n5 1 \n\n");
}
