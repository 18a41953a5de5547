use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A grid cell identified by its resolved `(x, y)` coordinate.
///
/// Coordinates compare by exact value under [`f64::total_cmp`]; `-0.0` is
/// normalised to `0.0` on construction so both zeros address the same cell.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Cell {
    x: f64,
    y: f64,
}

impl Cell {
    /// Creates a cell key from resolved coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: x + 0.0, y: y + 0.0 }
    }

    /// Resolved x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Resolved y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// Occurrence counts keyed by cell.
pub type BinCounts = BTreeMap<Cell, usize>;

/// Counts how many points of the parallel `xs`/`ys` sequences fall in each cell.
pub fn bin_counts(xs: &[f64], ys: &[f64]) -> BinCounts {
    let mut counts = BinCounts::new();
    accumulate(&mut counts, xs, ys);
    counts
}

/// Adds the points of `xs`/`ys` to an existing count table.
pub fn accumulate(counts: &mut BinCounts, xs: &[f64], ys: &[f64]) {
    for (x, y) in xs.iter().zip(ys) {
        *counts.entry(Cell::new(*x, *y)).or_insert(0) += 1;
    }
}
