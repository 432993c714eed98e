//! # grid_search_viz
//!
//! Breadth-first and depth-first search on a small grid of cells, built to be watched. A
//! [Controller](controller::Controller) turns clicks into start, end and wall cells; a
//! [Run](search::Run) then performs the search one grid mutation at a time, first marking the
//! explored frontier and then the reconstructed path, so that a [Renderer](animate::Renderer)
//! can redraw after every step.
//!
//! Movement is restricted to the four axis-aligned neighbours, expanded in the fixed order
//! down, up, right, left, which makes every run reproducible.
//!
//! ```
//! use grid_search_viz::{Algorithm, Controller, Coord};
//!
//! let mut controller = Controller::new(3, 3).unwrap();
//! controller.place(Coord::new(0, 0)).unwrap(); // start
//! controller.place(Coord::new(2, 2)).unwrap(); // end
//! controller.place(Coord::new(1, 1)).unwrap(); // wall
//! let outcome = controller.run_search(Algorithm::Bfs).unwrap().finish();
//! assert_eq!(outcome.path_len(), Some(5));
//! ```
pub mod animate;
pub mod cell_grid;
pub mod config;
pub mod controller;
pub mod coord;
pub mod error;
pub mod path;
pub mod search;

pub use animate::{animate, Renderer};
pub use cell_grid::{CellGrid, CellState};
pub use config::VisualizerConfig;
pub use controller::{Action, Controller, Role};
pub use coord::Coord;
pub use error::GridError;
pub use path::{reconstruct, ParentMap};
pub use search::{run, run_bfs, run_dfs, Algorithm, Run, SearchEvent, SearchOutcome};
