use core::fmt;

use smallvec::SmallVec;

/// Row and column offsets of the four axis-aligned moves, in expansion order:
/// down, up, right, left.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A cell position on the grid. Rows grow downwards, columns to the right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// Applies a signed offset, returning [None] if either component would become negative.
    /// Upper bounds are left to the grid.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row as isize)?;
        let col = self.col.checked_add_signed(d_col as isize)?;
        Some(Coord { row, col })
    }

    /// The unbounded 4-neighbourhood in [NEIGHBOR_OFFSETS] order.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coord; 4]> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if the two coordinates share an edge.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
