use std::collections::VecDeque;

use crate::coord::Coord;
use crate::search::Frontier;

/// First-in first-out frontier: cells are expanded in the order they were discovered.
#[derive(Clone, Debug, Default)]
pub struct Queue {
    coords: VecDeque<Coord>,
}

impl Frontier for Queue {
    fn push(&mut self, coord: Coord) {
        self.coords.push_back(coord);
    }
    fn pop(&mut self) -> Option<Coord> {
        self.coords.pop_front()
    }
    fn len(&self) -> usize {
        self.coords.len()
    }
}
