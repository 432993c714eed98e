use std::io;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::cell_grid::CellGrid;
use crate::search::{Run, SearchOutcome};

/// Draws the grid. Called once after every mutation of an animated run.
pub trait Renderer {
    fn render(&mut self, grid: &CellGrid) -> io::Result<()>;
}

/// Drives `run` to completion: every event is followed by a redraw and a pause of `delay`.
/// The run cannot be interrupted once started.
pub fn animate<R: Renderer + ?Sized>(
    mut run: Run<'_>,
    renderer: &mut R,
    delay: Duration,
) -> io::Result<SearchOutcome> {
    let mut steps = 0;
    while run.next().is_some() {
        steps += 1;
        renderer.render(run.grid())?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    debug!("Animated {} in {} steps", run.algorithm(), steps);
    Ok(run.finish())
}
