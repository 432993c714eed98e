use log::debug;

use crate::cell_grid::{CellGrid, CellState};
use crate::coord::Coord;
use crate::error::GridError;
use crate::search::{Algorithm, Run};

/// What a placement put on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    End,
    Wall,
}

impl From<Role> for CellState {
    fn from(role: Role) -> CellState {
        match role {
            Role::Start => CellState::Start,
            Role::End => CellState::End,
            Role::Wall => CellState::Wall,
        }
    }
}

/// An input already translated to grid terms by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Place(Coord),
    Erase(Coord),
    Run(Algorithm),
    Clear,
}

/// Owns the grid between runs together with the remembered start and end cells.
///
/// Placements follow a fixed order: the first cell becomes the start, the next distinct cell
/// the end, every further cell a wall. Erasing an endpoint frees its slot again.
#[derive(Clone, Debug)]
pub struct Controller {
    grid: CellGrid,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Controller {
    pub fn new(rows: usize, cols: usize) -> Result<Controller, GridError> {
        Ok(Controller::from_grid(CellGrid::new(rows, cols)?))
    }
    /// Takes over an existing grid, picking up its start and end cells. Leftover trace marks
    /// are cleared.
    pub fn from_grid(mut grid: CellGrid) -> Controller {
        grid.clear_trace();
        let start = grid.find(CellState::Start);
        let end = grid.find(CellState::End);
        Controller { grid, start, end }
    }
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }
    pub fn start(&self) -> Option<Coord> {
        self.start
    }
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Places the next role at `coord`. Returns [None] when the cell already holds an endpoint
    /// and nothing changed. With no start placed, any cell becomes the start, the end cell
    /// included; a search then succeeds on the spot.
    pub fn place(&mut self, coord: Coord) -> Result<Option<Role>, GridError> {
        self.grid.check_bounds(coord)?;
        let is_start = self.start == Some(coord);
        let is_end = self.end == Some(coord);
        let role = match (self.start, self.end) {
            (None, _) => Role::Start,
            (Some(_), None) if !is_start => Role::End,
            _ if !is_start && !is_end => Role::Wall,
            _ => return Ok(None),
        };
        self.put(coord, role)?;
        Ok(Some(role))
    }

    /// Places `role` at `coord` regardless of the placement order. An endpoint placed elsewhere
    /// before is moved; a wall over an endpoint removes that endpoint.
    pub fn place_role(&mut self, coord: Coord, role: Role) -> Result<(), GridError> {
        self.grid.check_bounds(coord)?;
        let previous = match role {
            Role::Start => self.start,
            Role::End => self.end,
            Role::Wall => None,
        };
        if let Some(old) = previous.filter(|&old| old != coord) {
            self.grid.set(old, CellState::Empty)?;
        }
        self.forget(coord);
        self.put(coord, role)
    }

    fn put(&mut self, coord: Coord, role: Role) -> Result<(), GridError> {
        self.grid.set(coord, role.into())?;
        match role {
            Role::Start => self.start = Some(coord),
            Role::End => self.end = Some(coord),
            Role::Wall => {}
        }
        debug!("Placed {:?} at {}", role, coord);
        Ok(())
    }

    fn forget(&mut self, coord: Coord) {
        if self.start == Some(coord) {
            self.start = None;
        }
        if self.end == Some(coord) {
            self.end = None;
        }
    }

    /// Resets `coord` to empty, freeing the start or end slot if it was held there.
    pub fn erase(&mut self, coord: Coord) -> Result<(), GridError> {
        self.grid.set(coord, CellState::Empty)?;
        self.forget(coord);
        debug!("Erased {}", coord);
        Ok(())
    }

    /// Starts a search between the placed endpoints after wiping the previous run's trace.
    pub fn run_search(&mut self, algorithm: Algorithm) -> Result<Run<'_>, GridError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(GridError::InvalidSearchRequest(
                "start and end must both be placed",
            ));
        };
        self.grid.clear_trace();
        Run::new(&mut self.grid, algorithm, start, end)
    }

    /// Empties the grid and forgets both endpoints.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.start = None;
        self.end = None;
        debug!("Cleared grid");
    }

    /// Applies an input action. A run request without both endpoints is ignored; otherwise the
    /// returned [Run] has to be driven by the caller.
    pub fn handle(&mut self, action: Action) -> Result<Option<Run<'_>>, GridError> {
        match action {
            Action::Place(coord) => self.place(coord).map(|_| None),
            Action::Erase(coord) => self.erase(coord).map(|_| None),
            Action::Clear => {
                self.clear();
                Ok(None)
            }
            Action::Run(algorithm) => match self.run_search(algorithm) {
                Ok(run) => Ok(Some(run)),
                Err(GridError::InvalidSearchRequest(reason)) => {
                    debug!("Ignoring {} request: {}", algorithm, reason);
                    Ok(None)
                }
                Err(e) => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_order() {
        let mut controller = Controller::new(4, 4).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 3);
        assert_eq!(controller.place(a), Ok(Some(Role::Start)));
        // The start cell cannot become the end.
        assert_eq!(controller.place(a), Ok(None));
        assert_eq!(controller.place(b), Ok(Some(Role::End)));
        assert_eq!(controller.place(b), Ok(None));
        for col in 1..4 {
            assert_eq!(controller.place(Coord::new(1, col)), Ok(Some(Role::Wall)));
        }
        let grid = controller.grid();
        assert_eq!(grid.get(a), Ok(CellState::Start));
        assert_eq!(grid.get(b), Ok(CellState::End));
        assert_eq!(grid.count(CellState::Wall), 3);
        assert_eq!(controller.start(), Some(a));
        assert_eq!(controller.end(), Some(b));
    }

    #[test]
    fn erasing_endpoints_frees_slots() {
        let mut controller = Controller::new(4, 4).unwrap();
        controller.place(Coord::new(0, 0)).unwrap();
        controller.place(Coord::new(3, 3)).unwrap();
        controller.erase(Coord::new(0, 0)).unwrap();
        assert_eq!(controller.start(), None);
        assert_eq!(controller.place(Coord::new(2, 2)), Ok(Some(Role::Start)));
        controller.erase(Coord::new(3, 3)).unwrap();
        assert_eq!(controller.end(), None);
        assert_eq!(controller.place(Coord::new(1, 1)), Ok(Some(Role::End)));
        assert_eq!(controller.grid().get(Coord::new(3, 3)), Ok(CellState::Empty));
        assert_eq!(controller.grid().get(Coord::new(0, 0)), Ok(CellState::Empty));
    }

    /// With only the end placed, clicking the end makes it the start as well.
    #[test]
    fn end_taken_for_start() {
        let mut controller = Controller::new(3, 3).unwrap();
        let end = Coord::new(2, 2);
        controller.place(Coord::new(0, 0)).unwrap();
        controller.place(end).unwrap();
        controller.erase(Coord::new(0, 0)).unwrap();
        assert_eq!(controller.place(end), Ok(Some(Role::Start)));
        assert_eq!(controller.start(), Some(end));
        assert_eq!(controller.end(), Some(end));
        assert_eq!(controller.grid().get(end), Ok(CellState::Start));
        // Both slots are taken, so the cell is not touched again.
        assert_eq!(controller.place(end), Ok(None));

        let mut run = controller.run_search(Algorithm::Bfs).unwrap();
        assert_eq!(run.next(), None);
        let outcome = run.finish();
        assert_eq!(outcome.path, Some(vec![end]));
        assert_eq!(controller.grid().count(CellState::Frontier), 0);

        controller.erase(end).unwrap();
        assert_eq!(controller.start(), None);
        assert_eq!(controller.end(), None);
        assert_eq!(controller.grid().get(end), Ok(CellState::Empty));
    }

    #[test]
    fn wall_round_trip_unblocks() {
        // |S#E|
        let mut controller = Controller::new(1, 3).unwrap();
        controller.place(Coord::new(0, 0)).unwrap();
        controller.place(Coord::new(0, 2)).unwrap();
        controller.place(Coord::new(0, 1)).unwrap();
        assert!(!controller.run_search(Algorithm::Bfs).unwrap().finish().found());
        controller.erase(Coord::new(0, 1)).unwrap();
        assert_eq!(controller.grid().get(Coord::new(0, 1)), Ok(CellState::Empty));
        let outcome = controller.run_search(Algorithm::Bfs).unwrap().finish();
        assert_eq!(outcome.path_len(), Some(3));
        assert_eq!(controller.grid().to_string(), "S*E\n");
    }

    #[test]
    fn run_requires_both_endpoints() {
        let mut controller = Controller::new(3, 3).unwrap();
        assert!(matches!(
            controller.run_search(Algorithm::Dfs),
            Err(GridError::InvalidSearchRequest(_))
        ));
        controller.place(Coord::new(0, 0)).unwrap();
        assert!(controller.handle(Action::Run(Algorithm::Bfs)).unwrap().is_none());
        assert_eq!(controller.grid().count(CellState::Frontier), 0);
    }

    #[test]
    fn rerun_starts_from_a_clean_trace() {
        let mut controller = Controller::new(5, 5).unwrap();
        controller.place(Coord::new(0, 0)).unwrap();
        controller.place(Coord::new(4, 4)).unwrap();
        controller.run_search(Algorithm::Dfs).unwrap().finish();
        let bfs_first = {
            let mut fresh = Controller::new(5, 5).unwrap();
            fresh.place(Coord::new(0, 0)).unwrap();
            fresh.place(Coord::new(4, 4)).unwrap();
            fresh.run_search(Algorithm::Bfs).unwrap().finish();
            fresh.grid().to_string()
        };
        controller.run_search(Algorithm::Bfs).unwrap().finish();
        assert_eq!(controller.grid().to_string(), bfs_first);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut controller = Controller::new(3, 3).unwrap();
        controller.handle(Action::Place(Coord::new(0, 0))).unwrap();
        controller.handle(Action::Place(Coord::new(2, 2))).unwrap();
        controller.handle(Action::Place(Coord::new(1, 1))).unwrap();
        assert!(controller.handle(Action::Clear).unwrap().is_none());
        assert_eq!(controller.start(), None);
        assert_eq!(controller.end(), None);
        assert_eq!(controller.grid().count(CellState::Empty), 9);
        assert_eq!(controller.place(Coord::new(1, 1)), Ok(Some(Role::Start)));
    }

    #[test]
    fn place_role_moves_endpoints() {
        let mut controller = Controller::new(3, 3).unwrap();
        controller.place_role(Coord::new(0, 0), Role::Start).unwrap();
        controller.place_role(Coord::new(0, 2), Role::End).unwrap();
        controller.place_role(Coord::new(1, 0), Role::Start).unwrap();
        assert_eq!(controller.grid().get(Coord::new(0, 0)), Ok(CellState::Empty));
        assert_eq!(controller.start(), Some(Coord::new(1, 0)));
        controller.place_role(Coord::new(0, 2), Role::Wall).unwrap();
        assert_eq!(controller.end(), None);
        assert_eq!(controller.grid().get(Coord::new(0, 2)), Ok(CellState::Wall));
        assert!(controller.place_role(Coord::new(3, 0), Role::Wall).is_err());
    }

    #[test]
    fn from_grid_picks_up_endpoints() {
        let grid: CellGrid = "So.\n.#*\n..E".parse().unwrap();
        let mut controller = Controller::from_grid(grid);
        assert_eq!(controller.start(), Some(Coord::new(0, 0)));
        assert_eq!(controller.end(), Some(Coord::new(2, 2)));
        assert_eq!(controller.grid().count(CellState::Frontier), 0);
        let outcome = controller.handle(Action::Run(Algorithm::Bfs)).unwrap().unwrap().finish();
        assert_eq!(outcome.path_len(), Some(5));
    }

    #[test]
    fn out_of_bounds_actions_fail() {
        let mut controller = Controller::new(2, 2).unwrap();
        assert!(controller.place(Coord::new(2, 0)).is_err());
        assert!(controller.handle(Action::Erase(Coord::new(0, 5))).is_err());
    }
}
