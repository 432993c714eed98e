use thiserror::Error;

use crate::coord::Coord;

/// Errors raised by the grid, the search runs and the controller.
///
/// Not finding a path is a normal outcome and is reported through
/// [SearchOutcome::path](crate::search::SearchOutcome::path) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside of the grid was passed to an accessor.
    #[error("{coord} is outside of the {rows}x{cols} grid")]
    OutOfBounds {
        coord: Coord,
        rows: usize,
        cols: usize,
    },

    #[error("grid dimensions must be non-zero")]
    EmptyGrid,

    /// The grid would not fit the terminal coordinate space.
    #[error("a {rows}x{cols} grid exceeds the {max}x{max} limit")]
    TooLarge { rows: usize, cols: usize, max: usize },

    /// A search was requested without both endpoints, or from a blocked cell.
    #[error("invalid search request: {0}")]
    InvalidSearchRequest(&'static str),

    /// Malformed text passed to [CellGrid::from_str](crate::cell_grid::CellGrid).
    #[error("layout line {line}: {reason}")]
    Layout { line: usize, reason: String },
}
