use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    ops::Add,
};

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid, optionally annotated with the cumulative
/// cost of reaching it.
///
/// Two points are equal when their coordinates match, regardless of cost.
/// There is deliberately no ordering on points: the frontier orders its own
/// entries by cost.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub cost: f64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y, cost: 0.0 }
    }

    pub const fn with_cost(x: i64, y: i64, cost: f64) -> Self {
        Self { x, y, cost }
    }

    /// Euclidean distance between the two coordinates
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The neighbouring coordinate at the given offset, without a cost. Saturates at the `i64` limits.
    pub fn offset_by(&self, dx: i64, dy: i64) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Add<(i64, i64)> for Point {
    type Output = Point;

    fn add(self, (dx, dy): (i64, i64)) -> Self::Output {
        self.offset_by(dx, dy)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
