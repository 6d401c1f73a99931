use std::fmt::Display;

use serde::Serialize;

use crate::error::GridError;
use crate::point::Point;

/// The cell value that marks impassable terrain
pub const OBSTACLE: f64 = 1.0;

/// Read-only view of an occupancy grid as needed by the search
pub trait OccupancyMap {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Check if the provided point lies inside the grid
    fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.y as usize) < self.rows()
            && (point.x as usize) < self.columns()
    }

    /// Check if the provided point is impassable. Points outside the grid count as blocked.
    fn is_blocked(&self, point: Point) -> bool;

    fn cell_count(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Create a storage of the same shape as the map, filled with `default`
    fn create_field<T: Copy>(&self, default: T) -> Field<T> {
        Field {
            rows: self.rows(),
            columns: self.columns(),
            cells: vec![vec![default; self.columns()]; self.rows()],
        }
    }
}

/// A rectangular grid of numeric cell markers, indexed as `cells[y][x]`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<f64>>,
}

impl Grid {
    /// A fully passable grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![0.0; columns]; rows],
        }
    }

    /// Build a grid from row-major cell values, rejecting empty or ragged input
    pub fn from_rows(cells: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let columns = cells.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(GridError::Empty);
        }

        for (row, values) in cells.iter().enumerate() {
            if values.len() != columns {
                return Err(GridError::Ragged {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(GridError::NotFinite { row, col });
            }
        }

        Ok(Self {
            rows: cells.len(),
            columns,
            cells,
        })
    }

    /// The raw value of a cell, or `None` outside the grid
    pub fn value(&self, point: Point) -> Option<f64> {
        if self.contains(point) {
            Some(self.cells[point.y as usize][point.x as usize])
        } else {
            None
        }
    }

    /// Overwrite a single cell. Points outside the grid are ignored.
    pub fn set(&mut self, point: Point, value: f64) {
        if self.contains(point) {
            self.cells[point.y as usize][point.x as usize] = value;
        }
    }

    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Scales the grid by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated `factor` times along both axes.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_cells = vec![vec![0.0; self.columns * factor]; self.rows * factor];

        for row in 0..self.rows {
            for col in 0..self.columns {
                for r in 0..factor {
                    for c in 0..factor {
                        new_cells[row * factor + r][col * factor + c] = self.cells[row][col];
                    }
                }
            }
        }

        self.rows *= factor;
        self.columns *= factor;
        self.cells = new_cells;
    }
}

impl OccupancyMap for Grid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn is_blocked(&self, point: Point) -> bool {
        self.value(point).map_or(true, |v| v == OBSTACLE)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", if *cell == OBSTACLE { "X" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-cell storage with the same shape as the map it was created from
#[derive(Clone, Debug, PartialEq)]
pub struct Field<T> {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<T>>,
}

impl<T: Copy> Field<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.y as usize) < self.rows
            && (point.x as usize) < self.columns
    }

    /// Panics if `point` is outside the field
    pub(crate) fn get(&self, point: Point) -> T {
        self.cells[point.y as usize][point.x as usize]
    }

    /// Bounds-checked lookup
    pub fn try_get(&self, point: Point) -> Option<T> {
        if self.contains(point) {
            Some(self.get(point))
        } else {
            None
        }
    }

    /// Panics if `point` is outside the field
    pub(crate) fn get_mut(&mut self, point: Point) -> &mut T {
        &mut self.cells[point.y as usize][point.x as usize]
    }

    /// Overwrite a single cell. Points outside the field are ignored.
    pub fn set(&mut self, point: Point, value: T) {
        if self.contains(point) {
            *self.get_mut(point) = value;
        }
    }

    /// Iterate over all cells as `(point, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, v)| (Point::new(x as i64, y as i64), *v))
        })
    }
}

impl Display for Field<f64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                if cell.is_finite() {
                    write!(f, "{:6.2} ", cell)?;
                } else {
                    write!(f, "{:6} ", "")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Display for Field<bool> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", if *cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![0.0, 0.0], vec![0.0]]).unwrap_err();
        assert!(matches!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(matches!(Grid::from_rows(vec![]), Err(GridError::Empty)));
        assert!(matches!(
            Grid::from_rows(vec![vec![]]),
            Err(GridError::Empty)
        ));
    }

    #[test]
    fn test_from_rows_rejects_nan() {
        let err = Grid::from_rows(vec![vec![0.0, f64::NAN]]).unwrap_err();
        assert!(matches!(err, GridError::NotFinite { row: 0, col: 1 }));
    }

    #[test]
    fn test_bounds_and_obstacles() {
        let mut grid = Grid::new(2, 3);
        grid.set(Point::new(2, 1), OBSTACLE);
        grid.set(Point::new(0, 0), 0.5);

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert!(grid.contains(Point::new(2, 1)));
        assert!(!grid.contains(Point::new(3, 1)));
        assert!(!grid.contains(Point::new(0, -1)));

        assert!(grid.is_blocked(Point::new(2, 1)));
        // only the exact marker is an obstacle
        assert!(!grid.is_blocked(Point::new(0, 0)));
        assert!(grid.is_blocked(Point::new(-1, 0)));
        assert_eq!(format!("{}", grid), "   \n  X\n");
    }

    #[test]
    fn test_scale_up() {
        let mut grid = Grid::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        grid.scale_up(2);

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.cells()[1], vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_field_shape_and_lookup() {
        let grid = Grid::new(3, 2);
        let mut field = grid.create_field(false);
        *field.get_mut(Point::new(1, 2)) = true;

        assert_eq!(field.rows(), 3);
        assert_eq!(field.columns(), 2);
        assert_eq!(field.try_get(Point::new(1, 2)), Some(true));
        assert_eq!(field.try_get(Point::new(2, 2)), None);
        assert_eq!(field.iter().filter(|(_, v)| *v).count(), 1);
        assert_eq!(format!("{}", field), "..\n..\n.#\n");
    }

    #[test]
    fn test_field_set_ignores_outside_points() {
        let mut field = Grid::new(2, 2).create_field(0.0);
        field.set(Point::new(1, 0), 3.0);
        field.set(Point::new(2, 0), 9.0);
        field.set(Point::new(0, -1), 9.0);

        assert_eq!(field.try_get(Point::new(1, 0)), Some(3.0));
        assert_eq!(field.try_get(Point::new(2, 0)), None);
        assert_eq!(field.iter().map(|(_, v)| v).sum::<f64>(), 3.0);
    }
}
