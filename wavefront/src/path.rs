use log::debug;
use serde::Serialize;

use crate::error::{Result, WaveError};
use crate::grid::OccupancyMap;
use crate::point::Point;
use crate::wave::{WaveField, WaveSearch};

/// A reconstructed path, ordered from the goal back to the start.
///
/// Every point carries the cost recorded for its cell by the expansion.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    pub total_cost: f64,
}

impl PathResult {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.path.contains(&point)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.path.iter()
    }

    /// The same points ordered from start to goal
    pub fn forward(&self) -> Vec<Point> {
        self.path.iter().rev().copied().collect()
    }

    /// Sum of the euclidean distances between consecutive points
    pub fn euclidean_length(&self) -> f64 {
        self.path
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

impl WaveSearch {
    /// Walk back from the goal to the start, always stepping to the cheapest
    /// neighbouring cell. Ties go to the neighbour that comes first in the
    /// neighborhood's offset order.
    pub fn build_path<M: OccupancyMap>(&self, field: &WaveField, map: &M) -> Result<PathResult> {
        self.check_endpoints(map)?;

        for (field_rows, field_columns) in [
            (field.costs.rows(), field.costs.columns()),
            (field.visited.rows(), field.visited.columns()),
        ] {
            if field_rows != map.rows() || field_columns != map.columns() {
                return Err(WaveError::ShapeMismatch {
                    rows: map.rows(),
                    columns: map.columns(),
                    field_rows,
                    field_columns,
                });
            }
        }

        let (start, goal) = (self.start(), self.goal());
        let total_cost = field
            .cost_at(goal)
            .ok_or(WaveError::UnreachableGoal { start, goal })?;

        let limit = self.config().max_path_steps.unwrap_or(map.cell_count());

        let mut current = Point::with_cost(goal.x, goal.y, total_cost);
        let mut path = vec![current];

        while current != start {
            if path.len() > limit {
                return Err(WaveError::ReconstructionBound {
                    limit,
                    last: current,
                });
            }

            let mut cheapest: Option<Point> = None;
            for &offset in self.neighborhood().offsets() {
                let candidate = current + offset;

                // neighbours outside the field take no part in the choice
                let Some(cost) = field.costs.try_get(candidate) else {
                    continue;
                };

                if cheapest.map_or(true, |best| cost < best.cost) {
                    cheapest = Some(Point::with_cost(candidate.x, candidate.y, cost));
                }
            }

            current = cheapest.ok_or(WaveError::ReconstructionBound {
                limit,
                last: current,
            })?;
            path.push(current);
        }

        debug!("built path of {} points from {} to {}", path.len(), goal, start);

        Ok(PathResult {
            path,
            start,
            goal,
            total_cost,
        })
    }

    /// Run [`WaveSearch::search`] followed by [`WaveSearch::build_path`]
    pub fn find_path<M: OccupancyMap>(&self, map: &M) -> Result<PathResult> {
        let field = self.search(map)?;
        self.build_path(&field, map)
    }
}
