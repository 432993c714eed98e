use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;

use crate::cell_grid::{CellGrid, CellState};
use crate::coord::Coord;
use crate::search::SearchEvent;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Records for every visited cell the cell it was reached from. The start maps to [None].
/// Entries keep their discovery order, so two identical runs yield identical maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentMap {
    parents: FxIndexMap<Coord, Option<Coord>>,
}

impl ParentMap {
    /// A map holding only the root of a search.
    pub fn with_root(start: Coord) -> ParentMap {
        let mut parents = FxIndexMap::default();
        parents.insert(start, None);
        ParentMap { parents }
    }
    /// Records `parent` for `child` unless `child` was already visited. Returns whether the
    /// entry is new.
    pub fn insert(&mut self, child: Coord, parent: Coord) -> bool {
        match self.parents.entry(child) {
            Vacant(e) => {
                e.insert(Some(parent));
                true
            }
            Occupied(_) => false,
        }
    }
    /// `None` if `coord` was never visited, `Some(None)` for the root.
    pub fn parent_of(&self, coord: &Coord) -> Option<Option<Coord>> {
        self.parents.get(coord).copied()
    }
    pub fn contains(&self, coord: &Coord) -> bool {
        self.parents.contains_key(coord)
    }
    pub fn len(&self) -> usize {
        self.parents.len()
    }
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
    /// Visited cells with their parents, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &Option<Coord>)> {
        self.parents.iter()
    }
}

/// Walks the parent links back from `end` and returns the path from `start` to `end`, both
/// inclusive. Returns [None] if `end` was not visited or the chain does not lead to `start`.
pub fn reconstruct(parents: &ParentMap, start: Coord, end: Coord) -> Option<Vec<Coord>> {
    if !parents.contains(&end) {
        return None;
    }
    let mut path: Vec<Coord> = std::iter::successors(Some(end), |current| {
        if *current == start {
            None
        } else {
            parents.parent_of(current).flatten()
        }
    })
    .take(parents.len())
    .collect();
    if path.last() != Some(&start) {
        return None;
    }
    path.reverse();
    Some(path)
}

/// True if consecutive cells share an edge and no cell is a wall.
pub fn is_valid_path(grid: &CellGrid, path: &[Coord]) -> bool {
    path.iter().all(|c| grid.is_passable(*c))
        && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}

/// Marks the interior of a reconstructed path as [CellState::Path], one cell per step, walking
/// from the end towards the start. The endpoints keep their own markers.
#[derive(Clone, Debug)]
pub struct PathMarker {
    pending: std::vec::IntoIter<Coord>,
}

impl PathMarker {
    pub fn new(path: &[Coord]) -> PathMarker {
        let interior = match path.len() {
            0..=2 => Vec::new(),
            n => path[1..n - 1].iter().rev().copied().collect(),
        };
        PathMarker {
            pending: interior.into_iter(),
        }
    }
    /// Number of cells still to be marked.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
    /// Marks the next cell, or returns [None] when the whole path is marked.
    pub fn step(&mut self, grid: &mut CellGrid) -> Option<SearchEvent> {
        let coord = self.pending.next()?;
        grid.set(coord, CellState::Path).ok()?;
        Some(SearchEvent {
            coord,
            state: CellState::Path,
        })
    }
}

/// Marks the whole path at once. Returns the number of cells marked.
pub fn mark_path(grid: &mut CellGrid, path: &[Coord]) -> usize {
    let mut marker = PathMarker::new(path);
    std::iter::from_fn(|| marker.step(grid)).count()
}
