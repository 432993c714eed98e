use std::time::Duration;

use crate::cell_grid::CellGrid;
use crate::controller::Controller;
use crate::error::GridError;

/// Grid size of the reference configuration.
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;
/// Largest number of rows or columns a session accepts. Cells are addressed with `u16` terminal
/// coordinates, two columns per cell, with a few rows below the grid.
pub const MAX_DIMENSION: usize = 1000;
/// Pause between two animation frames.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(20);

/// Settings of an interactive session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub rows: usize,
    pub cols: usize,
    pub step_delay: Duration,
    /// Initial grid in the text format of [CellGrid]. Overrides `rows` and `cols`.
    pub layout: Option<String>,
}

impl Default for VisualizerConfig {
    fn default() -> VisualizerConfig {
        VisualizerConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            step_delay: DEFAULT_STEP_DELAY,
            layout: None,
        }
    }
}

impl VisualizerConfig {
    /// Builds the controller the session starts from. Grids larger than [MAX_DIMENSION] in
    /// either direction are rejected.
    pub fn controller(&self) -> Result<Controller, GridError> {
        let grid = match &self.layout {
            Some(text) => text.parse::<CellGrid>()?,
            None => {
                check_dimensions(self.rows, self.cols)?;
                CellGrid::new(self.rows, self.cols)?
            }
        };
        check_dimensions(grid.rows(), grid.cols())?;
        Ok(Controller::from_grid(grid))
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), GridError> {
    if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(GridError::TooLarge {
            rows,
            cols,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_grid::CellState;
    use crate::coord::Coord;

    #[test]
    fn default_is_reference_setup() {
        let config = VisualizerConfig::default();
        let controller = config.controller().unwrap();
        assert_eq!(controller.grid().rows(), 20);
        assert_eq!(controller.grid().cols(), 20);
        assert_eq!(config.step_delay, Duration::from_millis(20));
    }

    #[test]
    fn layout_overrides_size() {
        let config = VisualizerConfig {
            layout: Some("S#\n.E\n".to_owned()),
            ..VisualizerConfig::default()
        };
        let controller = config.controller().unwrap();
        assert_eq!(controller.grid().rows(), 2);
        assert_eq!(controller.grid().get(Coord::new(0, 1)), Ok(CellState::Wall));
        assert_eq!(controller.end(), Some(Coord::new(1, 1)));

        let zero = VisualizerConfig {
            rows: 0,
            ..VisualizerConfig::default()
        };
        assert_eq!(zero.controller().unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn oversize_grids_are_rejected() {
        let edge = VisualizerConfig {
            rows: MAX_DIMENSION,
            cols: 1,
            ..VisualizerConfig::default()
        };
        assert_eq!(edge.controller().unwrap().grid().rows(), MAX_DIMENSION);

        let tall = VisualizerConfig {
            rows: 70_000,
            ..VisualizerConfig::default()
        };
        assert_eq!(
            tall.controller().unwrap_err(),
            GridError::TooLarge {
                rows: 70_000,
                cols: DEFAULT_COLS,
                max: MAX_DIMENSION
            }
        );

        let wide = VisualizerConfig {
            layout: Some(".".repeat(MAX_DIMENSION + 1)),
            ..VisualizerConfig::default()
        };
        assert!(matches!(
            wide.controller(),
            Err(GridError::TooLarge { rows: 1, .. })
        ));
    }
}
