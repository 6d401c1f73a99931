//! Error types for the wave search

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

use crate::point::Point;

/// Which of the two search endpoints a precondition failure refers to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Start => "start",
                Endpoint::Goal => "goal",
            }
        )
    }
}

/// Failures while turning external input into a [`crate::Grid`]
#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({col}, {row}) is not a finite number")]
    NotFinite { row: usize, col: usize },

    #[error("numpy grid must be 2-D, got shape {0:?}")]
    NpyShape(Vec<u64>),

    #[error("unsupported numpy dtype {0}")]
    NpyDtype(String),

    #[error("unsupported grid file '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("could not read grid: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode grid image: {0}")]
    Image(#[from] image::ImageError),

    #[error("could not decode grid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`WaveError`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Configuration,
    Precondition,
    UnreachableGoal,
    ReconstructionBound,
    ExpansionLimit,
    GridLoad,
}

#[derive(Error, Debug)]
pub enum WaveError {
    #[error("unknown neighborhood '{0}', expected 'neumann' or 'moore'")]
    UnknownNeighborhood(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{endpoint} {point} is outside the {columns}x{rows} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        rows: usize,
        columns: usize,
    },

    #[error("{endpoint} {point} lies on an obstacle")]
    OnObstacle { endpoint: Endpoint, point: Point },

    #[error("field of {field_columns}x{field_rows} cells does not match the {columns}x{rows} grid")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        field_rows: usize,
        field_columns: usize,
    },

    #[error("goal {goal} cannot be reached from {start}")]
    UnreachableGoal { start: Point, goal: Point },

    #[error("path reconstruction stopped at {last} after {limit} steps without reaching the start")]
    ReconstructionBound { limit: usize, last: Point },

    #[error("search gave up after {0} expansions")]
    ExpansionLimit(usize),

    #[error(transparent)]
    GridLoad(#[from] GridError),
}

impl WaveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WaveError::UnknownNeighborhood(_) | WaveError::Config(_) => ErrorKind::Configuration,
            WaveError::OutOfBounds { .. }
            | WaveError::OnObstacle { .. }
            | WaveError::ShapeMismatch { .. } => ErrorKind::Precondition,
            WaveError::UnreachableGoal { .. } => ErrorKind::UnreachableGoal,
            WaveError::ReconstructionBound { .. } => ErrorKind::ReconstructionBound,
            WaveError::ExpansionLimit(_) => ErrorKind::ExpansionLimit,
            WaveError::GridLoad(_) => ErrorKind::GridLoad,
        }
    }
}

impl From<serde_json::Error> for WaveError {
    fn from(e: serde_json::Error) -> Self {
        WaveError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WaveError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kind_groups_preconditions() {
        let out = WaveError::OutOfBounds {
            endpoint: Endpoint::Goal,
            point: Point::new(9, 9),
            rows: 3,
            columns: 3,
        };
        let blocked = WaveError::OnObstacle {
            endpoint: Endpoint::Start,
            point: Point::new(0, 0),
        };

        assert_eq!(out.kind(), ErrorKind::Precondition);
        assert_eq!(blocked.kind(), ErrorKind::Precondition);
        assert_eq!(out.to_string(), "goal (9, 9) is outside the 3x3 grid");
    }

    #[test]
    fn test_grid_error_is_grid_load() {
        let err: WaveError = GridError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::GridLoad);
        assert_eq!(err.to_string(), "grid has no cells");
    }
}
