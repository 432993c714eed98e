use std::collections::VecDeque;

use crate::cell_grid::{CellGrid, CellState};
use crate::coord::Coord;
use crate::path::ParentMap;
use crate::search::{Frontier, SearchEvent};

/// The expansion loop shared by BFS and DFS; only the [Frontier] discipline differs.
///
/// Work is done lazily: each call to [step](Traversal::step) marks at most one newly discovered
/// cell. Discovered cells are recorded in the parent map and pushed to the frontier straight
/// away, but their [CellState::Frontier] mark is applied only when the matching event is handed
/// out, so a renderer always sees the grid in the state described by the last event.
pub(crate) struct Traversal {
    frontier: Box<dyn Frontier>,
    parents: ParentMap,
    end: Coord,
    unmarked: VecDeque<Coord>,
    done: bool,
}

impl Traversal {
    pub(crate) fn new(mut frontier: Box<dyn Frontier>, start: Coord, end: Coord) -> Traversal {
        frontier.push(start);
        Traversal {
            frontier,
            parents: ParentMap::with_root(start),
            end,
            unmarked: VecDeque::new(),
            done: false,
        }
    }

    pub(crate) fn parents(&self) -> &ParentMap {
        &self.parents
    }

    pub(crate) fn into_parents(self) -> ParentMap {
        self.parents
    }

    /// Pops one coordinate and queues its unvisited passable neighbours. Returns false once the
    /// end was popped or the frontier ran dry.
    fn expand(&mut self, grid: &CellGrid) -> bool {
        let Some(current) = self.frontier.pop() else {
            return false;
        };
        if current == self.end {
            return false;
        }
        for n in current.neumann_neighborhood() {
            if grid.is_passable(n) && self.parents.insert(n, current) {
                self.frontier.push(n);
                self.unmarked.push_back(n);
            }
        }
        true
    }

    /// Applies the frontier mark. Start and end cells keep their markers and produce no event.
    fn mark(grid: &mut CellGrid, coord: Coord) -> Option<SearchEvent> {
        match grid.get(coord).ok()? {
            CellState::Start | CellState::End => None,
            _ => {
                grid.set(coord, CellState::Frontier).ok()?;
                Some(SearchEvent {
                    coord,
                    state: CellState::Frontier,
                })
            }
        }
    }

    /// Produces the next frontier mark, or [None] once the traversal has stopped.
    pub(crate) fn step(&mut self, grid: &mut CellGrid) -> Option<SearchEvent> {
        loop {
            while let Some(coord) = self.unmarked.pop_front() {
                if let Some(event) = Traversal::mark(grid, coord) {
                    return Some(event);
                }
            }
            if self.done {
                return None;
            }
            if !self.expand(grid) {
                self.done = true;
            }
        }
    }
}
