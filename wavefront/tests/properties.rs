//! Property tests for search and reconstruction on random grids.

use proptest::prelude::*;
use wavefront::{ErrorKind, Grid, Neighborhood, OccupancyMap, Point, WaveSearch, OBSTACLE};

fn neighborhood() -> impl Strategy<Value = Neighborhood> {
    prop_oneof![Just(Neighborhood::Neumann), Just(Neighborhood::Moore)]
}

/// A grid with random obstacles, plus a start and goal on passable cells
fn scenario() -> impl Strategy<Value = (Grid, Point, Point)> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(rows, columns)| {
            (
                prop::collection::vec(prop::bool::weighted(0.3), rows * columns),
                Just((rows, columns)),
                0..columns,
                0..rows,
                0..columns,
                0..rows,
            )
        })
        .prop_map(|(blocked, (rows, columns), sx, sy, gx, gy)| {
            let mut grid = Grid::new(rows, columns);
            for (i, b) in blocked.into_iter().enumerate() {
                if b {
                    let p = Point::new((i % columns) as i64, (i / columns) as i64);
                    grid.set(p, OBSTACLE);
                }
            }
            let start = Point::new(sx as i64, sy as i64);
            let goal = Point::new(gx as i64, gy as i64);
            grid.set(start, 0.0);
            grid.set(goal, 0.0);
            (grid, start, goal)
        })
}

fn is_step(a: &Point, b: &Point, neighborhood: Neighborhood) -> bool {
    neighborhood
        .offsets()
        .iter()
        .any(|&offset| *a + offset == *b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// On an open grid there is always a path and it is never shorter than the straight line.
    #[test]
    fn open_grid_always_has_path(
        rows in 1usize..16,
        columns in 1usize..16,
        seed in any::<(u16, u16, u16, u16)>(),
        neighborhood in neighborhood(),
    ) {
        let grid = Grid::new(rows, columns);
        let start = Point::new((seed.0 as usize % columns) as i64, (seed.1 as usize % rows) as i64);
        let goal = Point::new((seed.2 as usize % columns) as i64, (seed.3 as usize % rows) as i64);

        let result = WaveSearch::new(start, goal, neighborhood).find_path(&grid).unwrap();

        prop_assert_eq!(result.path.first(), Some(&goal));
        prop_assert_eq!(result.path.last(), Some(&start));
        prop_assert!(result.euclidean_length() >= start.distance_to(&goal) - 1e-9);
    }

    /// Paths only use passable cells, move one neighbour at a time and strictly descend in cost.
    #[test]
    fn paths_are_well_formed((grid, start, goal) in scenario(), neighborhood in neighborhood()) {
        let search = WaveSearch::new(start, goal, neighborhood);

        match search.find_path(&grid) {
            Ok(result) => {
                prop_assert_eq!(result.path.first(), Some(&goal));
                prop_assert_eq!(result.path.last(), Some(&start));
                prop_assert!(result.len() <= grid.cell_count());
                for p in result.iter() {
                    prop_assert!(!grid.is_blocked(*p));
                }
                for pair in result.path.windows(2) {
                    prop_assert!(is_step(&pair[0], &pair[1], neighborhood));
                    prop_assert!(pair[1].cost < pair[0].cost);
                }
            }
            Err(e) => prop_assert_eq!(e.kind(), ErrorKind::UnreachableGoal),
        }
    }

    /// Starting on the goal yields the single point path.
    #[test]
    fn start_equals_goal((grid, start, _) in scenario(), neighborhood in neighborhood()) {
        let result = WaveSearch::new(start, start, neighborhood).find_path(&grid).unwrap();
        prop_assert_eq!(result.path, vec![start]);
    }
}
