use core::fmt;
use std::mem;

use log::{info, warn};

use crate::cell_grid::{CellGrid, CellState};
use crate::coord::Coord;
use crate::error::GridError;
use crate::path::{reconstruct, ParentMap, PathMarker};

pub mod bfs;
pub mod dfs;
mod traversal;

use bfs::Queue;
use dfs::Stack;
use traversal::Traversal;

/// Holds the coordinates waiting to be expanded. The discipline of [pop](Frontier::pop) is the
/// only difference between the search algorithms.
pub trait Frontier {
    fn push(&mut self, coord: Coord);
    fn pop(&mut self) -> Option<Coord>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Breadth-first: shortest paths in number of moves.
    Bfs,
    /// Depth-first: some path, not necessarily a short one.
    Dfs,
}

impl Algorithm {
    pub fn frontier(self) -> Box<dyn Frontier> {
        match self {
            Algorithm::Bfs => Box::new(Queue::default()),
            Algorithm::Dfs => Box::new(Stack::default()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::Dfs => write!(f, "DFS"),
        }
    }
}

/// One grid mutation performed by a [Run]: `coord` now holds `state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchEvent {
    pub coord: Coord,
    pub state: CellState,
}

/// What a finished [Run] leaves behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub parents: ParentMap,
    /// Start to end inclusive, [None] if the end could not be reached.
    pub path: Option<Vec<Coord>>,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
    /// Number of cells on the path, endpoints included.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}

enum Phase {
    Traversing(Traversal),
    Marking(PathMarker),
    Done,
}

/// A single search from `start` to `end`, exposed as a lazy sequence of [SearchEvent]s.
///
/// The run first yields the frontier marks of the traversal, then the path marks of the
/// reconstruction. It never sleeps or draws; whoever pulls the events decides the pacing. The
/// grid stays borrowed until the run is dropped and can be inspected through [grid](Run::grid)
/// between steps.
pub struct Run<'g> {
    grid: &'g mut CellGrid,
    algorithm: Algorithm,
    start: Coord,
    end: Coord,
    phase: Phase,
    outcome: Option<SearchOutcome>,
}

impl<'g> Run<'g> {
    /// Validates the endpoints and prepares the run. No cell is touched before the first event
    /// is pulled.
    pub fn new(
        grid: &'g mut CellGrid,
        algorithm: Algorithm,
        start: Coord,
        end: Coord,
    ) -> Result<Run<'g>, GridError> {
        grid.check_bounds(end)?;
        if !grid.get(start)?.is_passable() {
            return Err(GridError::InvalidSearchRequest("start cell is a wall"));
        }
        info!("Running {} from {} to {}", algorithm, start, end);
        let phase = if start == end {
            Phase::Done
        } else {
            Phase::Traversing(Traversal::new(algorithm.frontier(), start, end))
        };
        let outcome = (start == end).then(|| SearchOutcome {
            parents: ParentMap::with_root(start),
            path: Some(vec![start]),
        });
        Ok(Run {
            grid,
            algorithm,
            start,
            end,
            phase,
            outcome,
        })
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    /// The grid as left by the last event.
    pub fn grid(&self) -> &CellGrid {
        &*self.grid
    }
    /// Cells visited so far, start included.
    pub fn visited(&self) -> usize {
        match (&self.phase, &self.outcome) {
            (Phase::Traversing(t), _) => t.parents().len(),
            (_, Some(outcome)) => outcome.parents.len(),
            _ => 0,
        }
    }
    /// Available once every event has been pulled.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match self.phase {
            Phase::Done => self.outcome.as_ref(),
            _ => None,
        }
    }
    /// Pulls the remaining events and returns the outcome.
    pub fn finish(mut self) -> SearchOutcome {
        self.by_ref().for_each(drop);
        self.outcome.unwrap_or_default()
    }

    /// Reconstructs the path once the traversal has stopped and picks the next phase.
    fn conclude(&mut self, traversal: Traversal) -> Phase {
        let parents = traversal.into_parents();
        let path = reconstruct(&parents, self.start, self.end);
        let phase = match &path {
            Some(path) => {
                info!(
                    "{} found a path of {} cells after visiting {}",
                    self.algorithm,
                    path.len(),
                    parents.len()
                );
                Phase::Marking(PathMarker::new(path))
            }
            None => {
                info!(
                    "{} found no path from {} to {} after visiting {}",
                    self.algorithm,
                    self.start,
                    self.end,
                    parents.len()
                );
                self.grid.update();
                if self.grid.reachable(&self.start, &self.end) {
                    warn!("Reachable end could not be pathed to, are the components correct?");
                }
                Phase::Done
            }
        };
        self.outcome = Some(SearchOutcome { parents, path });
        phase
    }
}

impl Iterator for Run<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        loop {
            match mem::replace(&mut self.phase, Phase::Done) {
                Phase::Traversing(mut traversal) => {
                    if let Some(event) = traversal.step(self.grid) {
                        self.phase = Phase::Traversing(traversal);
                        return Some(event);
                    }
                    self.phase = self.conclude(traversal);
                }
                Phase::Marking(mut marker) => {
                    if let Some(event) = marker.step(self.grid) {
                        self.phase = Phase::Marking(marker);
                        return Some(event);
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}

/// Runs `algorithm` to completion, marking the trace and the path on `grid`.
pub fn run(
    grid: &mut CellGrid,
    algorithm: Algorithm,
    start: Coord,
    end: Coord,
) -> Result<SearchOutcome, GridError> {
    Ok(Run::new(grid, algorithm, start, end)?.finish())
}

pub fn run_bfs(grid: &mut CellGrid, start: Coord, end: Coord) -> Result<SearchOutcome, GridError> {
    run(grid, Algorithm::Bfs, start, end)
}

pub fn run_dfs(grid: &mut CellGrid, start: Coord, end: Coord) -> Result<SearchOutcome, GridError> {
    run(grid, Algorithm::Dfs, start, end)
}
