use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma};
use npyz::{DType, NpyFile, Order, TypeChar};

use crate::error::GridError;
use crate::grid::{Grid, OccupancyMap, OBSTACLE};
use crate::path::PathResult;

/// Dark pixels (first channel below 128) become obstacles, everything else is passable
pub fn parse_img(img: &DynamicImage) -> Result<Grid, GridError> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![OBSTACLE; width]; height];

    for (row, values) in cells.iter_mut().enumerate() {
        for (col, cell) in values.iter_mut().enumerate() {
            let p = img.get_pixel(col as u32, row as u32);

            *cell = if p.0[0] < 128 { OBSTACLE } else { 0.0 };
        }
    }

    Grid::from_rows(cells)
}

/// Parse a json array of rows, e.g. `[[0, 0, 1], [0, 1, 0]]`
pub fn parse_json(s: &str) -> Result<Grid, GridError> {
    let cells: Vec<Vec<f64>> = serde_json::from_str(s)?;
    Grid::from_rows(cells)
}

/// Read a 2-D numpy array of floats, integers or booleans as written by `numpy.save`
pub fn parse_npy<R: Read>(reader: R) -> Result<Grid, GridError> {
    let npy = NpyFile::new(reader)?;

    let (rows, columns) = match npy.shape() {
        &[rows, columns] => (rows as usize, columns as usize),
        shape => return Err(GridError::NpyShape(shape.to_vec())),
    };
    let order = npy.order();

    let DType::Plain(ty) = npy.dtype().clone() else {
        return Err(GridError::NpyDtype(format!("{:?}", npy.dtype())));
    };

    let values: Vec<f64> = match (ty.type_char(), ty.size_field()) {
        (TypeChar::Float, 8) => npy.into_vec::<f64>()?,
        (TypeChar::Float, 4) => npy.into_vec::<f32>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Int, 1) => npy.into_vec::<i8>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Int, 2) => npy.into_vec::<i16>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Int, 4) => npy.into_vec::<i32>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Int, 8) => npy.into_vec::<i64>()?.into_iter().map(|v| v as f64).collect(),
        (TypeChar::Uint, 1) => npy.into_vec::<u8>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Uint, 2) => npy.into_vec::<u16>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Uint, 4) => npy.into_vec::<u32>()?.into_iter().map(f64::from).collect(),
        (TypeChar::Uint, 8) => npy.into_vec::<u64>()?.into_iter().map(|v| v as f64).collect(),
        (TypeChar::Bool, 1) => npy
            .into_vec::<bool>()?
            .into_iter()
            .map(|v| if v { OBSTACLE } else { 0.0 })
            .collect(),
        _ => return Err(GridError::NpyDtype(format!("{:?}", ty))),
    };

    let index = |row: usize, col: usize| match order {
        Order::C => row * columns + col,
        Order::Fortran => col * rows + row,
    };

    let cells = (0..rows)
        .map(|row| (0..columns).map(|col| values[index(row, col)]).collect())
        .collect();

    Grid::from_rows(cells)
}

/// Load a grid from a `.npy` or `.json` file, or any image format the `image` crate can decode
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid, GridError> {
    let path = path.as_ref();

    let has_extension = |wanted: &str| {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    };

    if has_extension("npy") {
        parse_npy(BufReader::new(File::open(path)?))
    } else if has_extension("json") {
        parse_json(&std::fs::read_to_string(path)?)
    } else if ImageFormat::from_path(path).is_ok() {
        parse_img(&image::open(path)?)
    } else {
        Err(GridError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Draw the grid at half intensity per cell value and the path on top at full intensity
pub fn render_path(grid: &Grid, path: &PathResult) -> GrayImage {
    let mut img = GrayImage::new(grid.columns() as u32, grid.rows() as u32);

    for (y, row) in grid.cells().iter().enumerate() {
        for (x, value) in row.iter().enumerate() {
            let level = (value * 0.5).clamp(0.0, 1.0);
            img.put_pixel(x as u32, y as u32, Luma([(level * 255.0) as u8]));
        }
    }

    for p in path.iter().filter(|p| grid.contains(**p)) {
        img.put_pixel(p.x as u32, p.y as u32, Luma([255]));
    }

    img
}
