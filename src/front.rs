//! Bounded Pareto front with incremental sorted-index maintenance.
//!
//! [`ParetoFront`] owns a set of mutually non-dominated [`Point`]s plus,
//! per objective, an index list that is always a permutation of all current
//! point positions sorted ascending by that objective's value. Inserts keep
//! the lists sorted without a full re-sort; removals shift the remaining
//! indices down. When the front grows past its soft capacity, points with
//! the lowest crowding distance are evicted, pinning per-objective extremes
//! and protecting feasible points while feasible capacity has not been
//! reached (Deb et al., 2002 style crowding).
//!
//! # Traversal during mutation
//!
//! [`remove_point`](ParetoFront::remove_point) returns the position of the
//! point following the removed one. Sweeps that remove while iterating use
//! exactly that contract:
//!
//! ```text
//! let mut pos = 0;
//! while pos < front.len() {
//!     if discard(&front[pos]) {
//!         pos = front.remove_point(pos);
//!     } else {
//!         pos += 1;
//!     }
//! }
//! ```

use core::ops::Index;
use core::slice;
use std::io;

use crate::point::Point;
use crate::types::Tolerances;

/// A bounded collection of mutually non-dominated points.
///
/// `max_points` is a soft capacity: a batch insert may transiently exceed
/// it until the crowding-distance cleanup restores it.
#[derive(Clone, Debug)]
pub struct ParetoFront {
    points: Vec<Point>,
    max_points: usize,
    /// One index list per objective, each a permutation of all current
    /// point positions sorted ascending by that objective's value.
    objective_sortings: Vec<Vec<usize>>,
    tolerances: Tolerances,
}

impl ParetoFront {
    /// Creates a front and inserts the initial batch **ignoring domination
    /// checks** — seeds are kept even if dominated or infeasible. If the
    /// batch exceeds `max_points`, one cleanup pass restores the capacity.
    /// All subsequent inserts are domination-checked.
    #[must_use]
    pub fn new(
        max_points: usize,
        num_objectives: usize,
        tolerances: Tolerances,
        initial_points: Vec<Point>,
    ) -> Self {
        let mut front = Self {
            points: Vec::new(),
            max_points,
            objective_sortings: vec![Vec::new(); num_objectives],
            tolerances,
        };
        for point in initial_points {
            front.try_insert(point, true);
        }
        if front.points.len() > front.max_points {
            front.cleanup();
        }
        debug_assert!(front.sorting_is_consistent());
        front
    }

    /// Number of points currently in the front.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the front holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of objectives.
    #[must_use]
    pub fn num_objectives(&self) -> usize {
        self.objective_sortings.len()
    }

    /// The soft capacity.
    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// The tolerances this front judges feasibility and domination with.
    #[must_use]
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// The point at `pos`, or `None` past the end.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&Point> {
        self.points.get(pos)
    }

    /// Iterates over the current points in position order.
    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Inserts one candidate, domination-checked: discarded if any current
    /// point weakly dominates it; otherwise every current point it weakly
    /// dominates is removed first. Runs cleanup if the insert pushes the
    /// front over capacity. Returns whether the candidate was inserted.
    pub fn add_point(&mut self, point: Point) -> bool {
        let inserted = self.try_insert(point, false);
        if self.points.len() > self.max_points {
            self.cleanup();
        }
        debug_assert!(self.sorting_is_consistent());
        inserted
    }

    /// Inserts one point **skipping the domination checks**, like the
    /// seeding constructor: the point goes in even if dominated or
    /// infeasible, and existing points are never pruned against it. Runs
    /// cleanup if the insert pushes the front over capacity.
    pub fn add_seed(&mut self, point: Point) {
        self.try_insert(point, true);
        if self.points.len() > self.max_points {
            self.cleanup();
        }
        debug_assert!(self.sorting_is_consistent());
    }

    /// Inserts a batch of candidates, each domination-checked, deferring
    /// cleanup until the whole batch is in. Returns how many were inserted.
    pub fn add_points(&mut self, points: Vec<Point>) -> usize {
        let mut inserted = 0;
        for point in points {
            if self.try_insert(point, false) {
                inserted += 1;
            }
        }
        if self.points.len() > self.max_points {
            self.cleanup();
        }
        debug_assert!(self.sorting_is_consistent());
        inserted
    }

    /// Removes the point at `pos` and returns the position of the point
    /// that followed it, keeping every per-objective index list sorted and
    /// in sync with the point collection.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn remove_point(&mut self, pos: usize) -> usize {
        self.points.remove(pos);
        for sorting in &mut self.objective_sortings {
            let at = sorting.iter().position(|&entry| entry == pos);
            debug_assert!(at.is_some(), "sorted index lists must cover every position");
            if let Some(at) = at {
                sorting.remove(at);
            }
            for entry in &mut *sorting {
                if *entry > pos {
                    *entry -= 1;
                }
            }
            debug_assert_eq!(sorting.len(), self.points.len());
        }
        debug_assert!(self.sorting_is_consistent());
        pos
    }

    /// Clears the stopped flag on every point.
    pub fn unstop_all(&self) {
        for point in &self.points {
            point.set_stopped(false);
        }
    }

    /// Whether every point is marked stopped.
    #[must_use]
    pub fn all_stopped(&self) -> bool {
        self.points.iter().all(Point::is_stopped)
    }

    /// Whether every point is feasible.
    #[must_use]
    pub fn all_feasible(&self) -> bool {
        self.num_feasible() == self.points.len()
    }

    /// Number of feasible points.
    #[must_use]
    pub fn num_feasible(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.is_feasible(&self.tolerances))
            .count()
    }

    /// Whether no pair of points weakly dominates one another.
    #[must_use]
    pub fn all_non_dominated(&self) -> bool {
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                if a.is_dominated(b, &self.tolerances) || b.is_dominated(a, &self.tolerances) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the front holds at least `max_points` points.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.points.len() >= self.max_points
    }

    /// Writes one line of space-separated coordinates per point, followed
    /// by a blank line.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_x<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for point in &self.points {
            for value in point.x() {
                write!(writer, "{value} ")?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)
    }

    /// Writes one line of space-separated objective values per point,
    /// followed by a blank line.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_f<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for point in &self.points {
            for value in point.objectives() {
                write!(writer, "{value} ")?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Domination-checked insert (`init` skips the checks entirely).
    /// Returns whether the candidate went in.
    fn try_insert(&mut self, point: Point, init: bool) -> bool {
        if !init {
            // Backwards so collected positions stay valid while removing.
            for pos in (0..self.points.len()).rev() {
                if point.is_dominated(&self.points[pos], &self.tolerances) {
                    return false;
                }
            }
            for pos in (0..self.points.len()).rev() {
                if self.points[pos].is_dominated(&point, &self.tolerances) {
                    self.remove_point(pos);
                }
            }
        }

        self.insert(point);
        true
    }

    /// Inserts into the point collection and every sorted index list.
    ///
    /// Per objective the slot is the first entry whose point's value is not
    /// smaller than the candidate's, found by binary search on the sorted
    /// list, so an insert costs O(objectives × log n) comparisons plus the
    /// list shifts.
    fn insert(&mut self, point: Point) {
        let slots: Vec<usize> = self
            .objective_sortings
            .iter()
            .enumerate()
            .map(|(objective, sorting)| {
                sorting.partition_point(|&pos| self.points[pos].is_smaller(&point, objective))
            })
            .collect();

        let new_pos = self.points.len();
        self.points.push(point);
        for (sorting, slot) in self.objective_sortings.iter_mut().zip(slots) {
            sorting.insert(slot, new_pos);
            debug_assert_eq!(sorting.len(), self.points.len());
        }
    }

    /// Evicts the lowest-crowding points (earliest position breaks ties)
    /// until the soft capacity is restored, recomputing the scores after
    /// every eviction so neighbor contributions stay current.
    fn cleanup(&mut self) {
        while self.points.len() > self.max_points {
            let scores = self.crowding_distances();
            let mut evict = 0;
            let mut lowest = f64::INFINITY;
            for (pos, &score) in scores.iter().enumerate() {
                if score < lowest {
                    lowest = score;
                    evict = pos;
                }
            }
            self.remove_point(evict);
        }
    }

    /// Crowding distance per point, indexed by position.
    ///
    /// For each objective the two extremes of the sorted order are pinned
    /// to infinity and every interior point accumulates the gap between its
    /// neighbors divided by the objective's range; a zero range contributes
    /// nothing rather than NaN. While fewer than `max_points` points are
    /// feasible, every feasible point's score is overridden to infinity so
    /// cleanup cannot evict it.
    fn crowding_distances(&self) -> Vec<f64> {
        let n = self.points.len();
        if n == 0 {
            return Vec::new();
        }

        let mut distances = vec![0.0_f64; n];
        for (objective, sorting) in self.objective_sortings.iter().enumerate() {
            let first = sorting[0];
            let last = sorting[n - 1];
            distances[first] = f64::INFINITY;
            distances[last] = f64::INFINITY;

            let range = self.points[last].objective(objective) - self.points[first].objective(objective);
            debug_assert!(range >= 0.0, "sorted order implies a non-negative range");
            if range > 0.0 {
                for window in 1..n - 1 {
                    let below = self.points[sorting[window - 1]].objective(objective);
                    let above = self.points[sorting[window + 1]].objective(objective);
                    distances[sorting[window]] += (above - below) / range;
                }
            }
        }

        if self.num_feasible() < self.max_points {
            for (pos, point) in self.points.iter().enumerate() {
                if point.is_feasible(&self.tolerances) {
                    distances[pos] = f64::INFINITY;
                }
            }
        }

        distances
    }

    /// Debug check: every index list is a full, ascending permutation.
    fn sorting_is_consistent(&self) -> bool {
        let n = self.points.len();
        self.objective_sortings
            .iter()
            .enumerate()
            .all(|(objective, sorting)| {
                sorting.len() == n
                    && sorting.iter().all(|&pos| pos < n)
                    && sorting.windows(2).all(|pair| {
                        self.points[pair[0]].objective(objective)
                            <= self.points[pair[1]].objective(objective)
                    })
            })
    }
}

impl Index<usize> for ParetoFront {
    type Output = Point;

    fn index(&self, pos: usize) -> &Point {
        &self.points[pos]
    }
}

impl<'a> IntoIterator for &'a ParetoFront {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
