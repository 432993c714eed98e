use core::fmt;
use std::str::FromStr;

use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::coord::Coord;
use crate::error::GridError;

/// Marker held by every cell of a [CellGrid].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// Discovered by a search run.
    Frontier,
    /// Part of the reconstructed path.
    Path,
}

impl CellState {
    /// Only walls block movement; trace marks are walked over like empty cells.
    pub fn is_passable(self) -> bool {
        self != CellState::Wall
    }
    /// True for the marks a search run leaves behind.
    pub fn is_trace(self) -> bool {
        matches!(self, CellState::Frontier | CellState::Path)
    }
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Path => '*',
        }
    }
    pub fn from_symbol(c: char) -> Option<CellState> {
        match c {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Wall),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Frontier),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// [CellGrid] stores one [CellState] per cell in row-major order. In addition it maintains the
/// 4-connected components of the passable cells in a [UnionFind] structure, which gives a cheap
/// reachability answer that does not depend on any search.
#[derive(Clone, Debug)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CellGrid {
    /// Creates a grid of `rows` by `cols` empty cells.
    pub fn new(rows: usize, cols: usize) -> Result<CellGrid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut grid = CellGrid {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
    /// Fails with [GridError::OutOfBounds] unless `coord` lies on the grid.
    pub fn check_bounds(&self, coord: Coord) -> Result<(), GridError> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
    fn get_ix(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }
    pub fn get(&self, coord: Coord) -> Result<CellState, GridError> {
        self.check_bounds(coord)?;
        Ok(self.cells[self.get_ix(coord)])
    }
    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// placing a wall may have split one apart.
    pub fn set(&mut self, coord: Coord, state: CellState) -> Result<(), GridError> {
        self.check_bounds(coord)?;
        let ix = self.get_ix(coord);
        let old = self.cells[ix];
        self.cells[ix] = state;
        if !state.is_passable() {
            if old.is_passable() {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbors(coord)? {
                if self.is_passable(n) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }
    /// The in-bounds neighbours of `coord` in the order down, up, right, left.
    pub fn neighbors(&self, coord: Coord) -> Result<SmallVec<[Coord; 4]>, GridError> {
        self.check_bounds(coord)?;
        Ok(coord
            .neumann_neighborhood()
            .into_iter()
            .filter(|n| self.in_bounds(*n))
            .collect())
    }
    /// In bounds and not a wall.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.cells[self.get_ix(coord)].is_passable()
    }
    /// Resets every cell to [CellState::Empty].
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.generate_components();
    }
    /// Resets the [CellState::Frontier] and [CellState::Path] marks left by a previous run.
    /// Walls and endpoints are kept. Components are unaffected since trace cells are passable.
    pub fn clear_trace(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_trace()) {
            *cell = CellState::Empty;
        }
    }
    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(ix, &state)| (Coord::new(ix / self.cols, ix % self.cols), state))
    }
    /// The first cell in row-major order holding `state`.
    pub fn find(&self, state: CellState) -> Option<Coord> {
        self.iter().find(|&(_, s)| s == state).map(|(c, _)| c)
    }
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: &Coord) -> Result<usize, GridError> {
        self.check_bounds(*coord)?;
        Ok(self.components.find(self.get_ix(*coord)))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Out-of-bounds points are
    /// unreachable. Call [update](Self::update) first if walls were placed since the last
    /// regeneration.
    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self
                .components
                .equiv(self.get_ix(*start), self.get_ix(*goal))
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up passable grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} grid", self.rows, self.cols);
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = Coord::new(row, col);
                if !self.is_passable(c) {
                    continue;
                }
                let ix = self.get_ix(c);
                // Looking down and right is enough to visit every edge once.
                for n in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                    if self.is_passable(n) {
                        let n_ix = self.get_ix(n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(|s| s.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the text produced by [Display](fmt::Display): one line per row, one symbol per cell.
/// Blank lines are skipped and at most one start and one end are accepted.
impl FromStr for CellGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<CellGrid, GridError> {
        let mut rows: Vec<Vec<CellState>> = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cells = line
                .chars()
                .map(|c| {
                    CellState::from_symbol(c).ok_or_else(|| GridError::Layout {
                        line: i + 1,
                        reason: format!("unknown cell symbol {:?}", c),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = rows.first() {
                if first.len() != cells.len() {
                    return Err(GridError::Layout {
                        line: i + 1,
                        reason: format!("expected {} cells, found {}", first.len(), cells.len()),
                    });
                }
            }
            rows.push(cells);
        }
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut grid = CellGrid::new(n_rows, n_cols)?;
        grid.cells = rows.into_iter().flatten().collect();
        for unique in [CellState::Start, CellState::End] {
            if grid.count(unique) > 1 {
                return Err(GridError::Layout {
                    line: 0,
                    reason: format!("more than one {:?} cell", unique),
                });
            }
        }
        grid.generate_components();
        Ok(grid)
    }
}
