use std::{cmp::Ordering, collections::BinaryHeap};

use log::{debug, info};

use crate::config::WaveConfig;
use crate::error::{Endpoint, Result, WaveError};
use crate::grid::{Field, OccupancyMap};
use crate::neighborhood::Neighborhood;
use crate::point::Point;

/// Cost recorded for cells the expansion never finalized
pub const UNREACHED: f64 = f64::INFINITY;

/// The objects that we store in the priority queue, ordered by the point's cost only
#[derive(Debug)]
struct ToVisit(Point);

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cost.total_cmp(&other.0.cost).reverse() // reverse for BinaryHeap to be a min-heap
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SearchState {
    Expanding,
    GoalReached { cost: f64 },
    /// The frontier ran empty before the goal was popped
    Exhausted,
}

impl SearchState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchState::Expanding)
    }
}

/// Everything the forward expansion leaves behind for reconstruction
#[derive(Clone, Debug)]
pub struct WaveField {
    pub costs: Field<f64>,
    pub visited: Field<bool>,
    pub state: SearchState,
    pub expansions: usize,
}

impl WaveField {
    /// The recorded cost of a cell, or `None` if it is outside the field or was never reached
    pub fn cost_at(&self, point: Point) -> Option<f64> {
        self.costs.try_get(point).filter(|c| c.is_finite())
    }

    pub fn reached_goal(&self) -> bool {
        matches!(self.state, SearchState::GoalReached { .. })
    }
}

/// A running wavefront expansion over a borrowed map.
///
/// Cells are marked visited the moment they are pushed onto the frontier,
/// not when they are popped. A cell therefore keeps the cost of the first
/// neighbour that enqueued it, even if a cheaper route shows up while it is
/// still waiting in the frontier. Its cost field entry is only written when
/// it is popped, so visited cells may still read [`UNREACHED`].
#[derive(Debug)]
pub struct Expansion<'a, M: OccupancyMap> {
    map: &'a M,
    goal: Point,
    neighborhood: Neighborhood,
    progress_interval: usize,
    costs: Field<f64>,
    visited: Field<bool>,
    frontier: BinaryHeap<ToVisit>,
    state: SearchState,
    expansions: usize,
}

impl<'a, M: OccupancyMap> Expansion<'a, M> {
    fn new(map: &'a M, start: Point, goal: Point, config: &WaveConfig) -> Self {
        let mut visited = map.create_field(false);
        *visited.get_mut(start) = true;

        let mut frontier = BinaryHeap::with_capacity(map.cell_count());
        frontier.push(ToVisit(Point::with_cost(start.x, start.y, 0.0)));

        Self {
            map,
            goal,
            neighborhood: config.neighborhood,
            progress_interval: config.progress_interval.max(1),
            costs: map.create_field(UNREACHED),
            visited,
            frontier,
            state: SearchState::Expanding,
            expansions: 0,
        }
    }

    /// Pop and expand a single frontier entry
    pub fn step(&mut self) -> SearchState {
        if self.state.is_done() {
            return self.state;
        }

        let Some(ToVisit(current)) = self.frontier.pop() else {
            info!(
                "frontier exhausted after {} expansions without reaching {}",
                self.expansions, self.goal
            );
            self.state = SearchState::Exhausted;
            return self.state;
        };

        self.expansions += 1;
        *self.costs.get_mut(current) = current.cost;

        if current == self.goal {
            info!(
                "reached goal {} with cost {:.3} after {} expansions",
                self.goal, current.cost, self.expansions
            );
            self.state = SearchState::GoalReached { cost: current.cost };
            return self.state;
        }

        for &offset in self.neighborhood.offsets() {
            let next = current + offset;

            if self.map.contains(next) && !self.visited.get(next) && !self.map.is_blocked(next) {
                *self.visited.get_mut(next) = true;
                self.frontier.push(ToVisit(Point::with_cost(
                    next.x,
                    next.y,
                    current.cost + current.distance_to(&next),
                )));
            }
        }

        if self.expansions % self.progress_interval == 0 {
            debug!(
                "expansion {}: {} cells waiting in the frontier",
                self.expansions,
                self.frontier.len()
            );
        }

        self.state
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn costs(&self) -> &Field<f64> {
        &self.costs
    }

    pub fn visited(&self) -> &Field<bool> {
        &self.visited
    }

    /// Drop the frontier and keep the fields
    pub fn into_field(self) -> WaveField {
        WaveField {
            costs: self.costs,
            visited: self.visited,
            state: self.state,
            expansions: self.expansions,
        }
    }
}

/// A wavefront search between two fixed points.
///
/// The neighborhood chosen here is used for both the forward expansion and
/// the path reconstruction.
#[derive(Clone, Debug)]
pub struct WaveSearch {
    start: Point,
    goal: Point,
    config: WaveConfig,
}

impl WaveSearch {
    pub fn new(start: Point, goal: Point, neighborhood: Neighborhood) -> Self {
        Self {
            start,
            goal,
            config: WaveConfig::default().with_neighborhood(neighborhood),
        }
    }

    /// Like [`WaveSearch::new`] but with the neighborhood given by name, e.g. `"Moore"`
    pub fn from_name(start: Point, goal: Point, neighborhood: &str) -> Result<Self> {
        Ok(Self::new(start, goal, neighborhood.parse()?))
    }

    pub fn with_config(start: Point, goal: Point, config: WaveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            start,
            goal,
            config,
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.config.neighborhood
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Both endpoints must be inside the map and on passable cells
    pub(crate) fn check_endpoints<M: OccupancyMap>(&self, map: &M) -> Result<()> {
        for (endpoint, point) in [(Endpoint::Start, self.start), (Endpoint::Goal, self.goal)] {
            if !map.contains(point) {
                return Err(WaveError::OutOfBounds {
                    endpoint,
                    point,
                    rows: map.rows(),
                    columns: map.columns(),
                });
            }
            if map.is_blocked(point) {
                return Err(WaveError::OnObstacle { endpoint, point });
            }
        }
        Ok(())
    }

    /// Start a stepwise expansion, e.g. to animate the wave
    pub fn expansion<'a, M: OccupancyMap>(&self, map: &'a M) -> Result<Expansion<'a, M>> {
        self.check_endpoints(map)?;
        Ok(Expansion::new(map, self.start, self.goal, &self.config))
    }

    /// Run the forward expansion until the goal is popped or the frontier runs empty.
    ///
    /// An exhausted frontier is not an error here; the returned field carries
    /// [`SearchState::Exhausted`] and [`WaveSearch::build_path`] reports the
    /// goal as unreachable.
    pub fn search<M: OccupancyMap>(&self, map: &M) -> Result<WaveField> {
        let mut expansion = self.expansion(map)?;

        loop {
            match expansion.step() {
                SearchState::Expanding => {
                    if let Some(max) = self.config.max_expansions {
                        if expansion.expansions() >= max {
                            return Err(WaveError::ExpansionLimit(max));
                        }
                    }
                }
                _ => return Ok(expansion.into_field()),
            }
        }
    }
}
