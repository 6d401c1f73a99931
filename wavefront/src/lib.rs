//! Wavefront path search on 2D occupancy grids.
//!
//! A [`WaveSearch`] expands a cost field outward from the start cell,
//! cheapest cell first, until the goal is popped. The path is then recovered
//! by walking back from the goal, always stepping to the neighbouring cell
//! with the lowest recorded cost.
//!
//! ```
//! use wavefront::{Grid, Neighborhood, Point, WaveSearch, OBSTACLE};
//!
//! let mut grid = Grid::new(5, 5);
//! grid.set(Point::new(2, 2), OBSTACLE);
//!
//! let search = WaveSearch::new(Point::new(0, 0), Point::new(4, 4), Neighborhood::Neumann);
//! let field = search.search(&grid)?;
//! let result = search.build_path(&field, &grid)?;
//!
//! assert_eq!(result.path.first(), Some(&Point::new(4, 4)));
//! assert_eq!(result.path.last(), Some(&Point::new(0, 0)));
//! # Ok::<(), wavefront::WaveError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod path;
pub mod point;
pub mod util;
pub mod wave;

pub use config::WaveConfig;
pub use error::{Endpoint, ErrorKind, GridError, Result, WaveError};
pub use grid::{Field, Grid, OccupancyMap, OBSTACLE};
pub use neighborhood::Neighborhood;
pub use path::PathResult;
pub use point::Point;
pub use wave::{Expansion, SearchState, WaveField, WaveSearch, UNREACHED};
