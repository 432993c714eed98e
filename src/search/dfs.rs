use crate::coord::Coord;
use crate::search::Frontier;

/// Last-in first-out frontier: the most recently discovered cell is expanded next.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    coords: Vec<Coord>,
}

impl Frontier for Stack {
    fn push(&mut self, coord: Coord) {
        self.coords.push(coord);
    }
    fn pop(&mut self) -> Option<Coord> {
        self.coords.pop()
    }
    fn len(&self) -> usize {
        self.coords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_grid::CellGrid;
    use crate::path::is_valid_path;
    use crate::search::{run_bfs, run_dfs};

    #[test]
    fn lifo_order() {
        let mut stack = Stack::default();
        stack.push(Coord::new(0, 0));
        stack.push(Coord::new(0, 1));
        assert_eq!(stack.pop(), Some(Coord::new(0, 1)));
        assert_eq!(stack.pop(), Some(Coord::new(0, 0)));
        assert_eq!(stack.pop(), None);
    }

    /// All neighbours are pushed before popping again, so the last pushed (left, then right)
    /// direction is followed first.
    #[test]
    fn expands_last_discovered_first() {
        // |S...E|
        let mut grid: CellGrid = "S...E".parse().unwrap();
        let outcome = run_dfs(&mut grid, Coord::new(0, 0), Coord::new(0, 4)).unwrap();
        assert_eq!(outcome.path_len(), Some(5));
        assert_eq!(outcome.parents.len(), 5);
    }

    /// On an open grid the depth-first route is valid but longer than the breadth-first one.
    #[test]
    fn not_shortest() {
        let mut bfs_grid = CellGrid::new(4, 4).unwrap();
        let mut dfs_grid = bfs_grid.clone();
        let (start, end) = (Coord::new(0, 0), Coord::new(3, 0));
        let bfs = run_bfs(&mut bfs_grid, start, end).unwrap();
        let dfs = run_dfs(&mut dfs_grid, start, end).unwrap();
        assert_eq!(bfs.path_len(), Some(4));
        let dfs_path = dfs.path.unwrap();
        // Sweeps right along the top row, then snakes back down the right side.
        assert_eq!(dfs_path.len(), 10);
        assert!(is_valid_path(&dfs_grid, &dfs_path));
        assert_eq!(dfs_path.first(), Some(&start));
        assert_eq!(dfs_path.last(), Some(&end));
    }

    #[test]
    fn unreachable_end() {
        // |S#.|
        // |##.|
        // |..E|
        let mut grid: CellGrid = "S#.\n##.\n..E".parse().unwrap();
        let outcome = run_dfs(&mut grid, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert!(!outcome.found());
        assert_eq!(outcome.parents.len(), 1);
    }
}
