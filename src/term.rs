//! Crossterm front end: draws the grid with background colours and turns mouse and key
//! events into controller [Action]s.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{info, warn};

use grid_search_viz::{
    animate, Action, Algorithm, CellGrid, CellState, Controller, Coord, Renderer, VisualizerConfig,
};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

const HELP: &str = "left: start/end/wall  right: erase  b/d: search  c: clear  q: quit";

fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::White,
        CellState::Wall => Color::Black,
        CellState::Start => Color::Green,
        CellState::End => Color::Red,
        CellState::Frontier => Color::Rgb {
            r: 50,
            g: 150,
            b: 255,
        },
        CellState::Path => Color::Yellow,
    }
}

/// A clickable label in the strip below the grid.
#[derive(Clone, Debug)]
struct Button {
    label: &'static str,
    column: u16,
    action: Action,
    color: Color,
}

impl Button {
    fn width(&self) -> u16 {
        self.label.len() as u16 + 4
    }
    fn contains(&self, column: u16) -> bool {
        column >= self.column && column < self.column + self.width()
    }
}

fn buttons() -> Vec<Button> {
    vec![
        Button {
            label: "BFS",
            column: 0,
            action: Action::Run(Algorithm::Bfs),
            color: Color::Rgb {
                r: 150,
                g: 200,
                b: 255,
            },
        },
        Button {
            label: "DFS",
            column: 9,
            action: Action::Run(Algorithm::Dfs),
            color: Color::Rgb {
                r: 150,
                g: 255,
                b: 200,
            },
        },
        Button {
            label: "Clear Grid",
            column: 18,
            action: Action::Clear,
            color: Color::Rgb {
                r: 255,
                g: 200,
                b: 200,
            },
        },
    ]
}

/// Maps a terminal position to a grid cell. Everything from row `rows` down is the button strip.
fn screen_to_cell(rows: usize, cols: usize, column: u16, row: u16) -> Option<Coord> {
    let coord = Coord::new(row as usize, (column / CELL_WIDTH) as usize);
    (coord.row < rows && coord.col < cols).then_some(coord)
}

/// The strip sits one blank line below the grid.
fn strip_row(rows: usize) -> u16 {
    rows as u16 + 1
}

fn button_at(buttons: &[Button], rows: usize, column: u16, row: u16) -> Option<Action> {
    if row != strip_row(rows) {
        return None;
    }
    buttons.iter().find(|b| b.contains(column)).map(|b| b.action)
}

fn translate(grid: &CellGrid, buttons: &[Button], mouse: MouseEvent) -> Option<Action> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cell = screen_to_cell(rows, cols, mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match cell {
            Some(c) => Some(Action::Place(c)),
            None => button_at(buttons, rows, mouse.column, mouse.row),
        },
        MouseEventKind::Drag(MouseButton::Left) => cell.map(Action::Place),
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            cell.map(Action::Erase)
        }
        _ => None,
    }
}

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('b') => Some(Action::Run(Algorithm::Bfs)),
        KeyCode::Char('d') => Some(Action::Run(Algorithm::Dfs)),
        KeyCode::Char('c') => Some(Action::Clear),
        _ => None,
    }
}

/// Draws into the alternate screen of the terminal.
pub struct TerminalRenderer {
    out: Stdout,
    buttons: Vec<Button>,
    status: String,
}

impl Default for TerminalRenderer {
    fn default() -> TerminalRenderer {
        TerminalRenderer::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> TerminalRenderer {
        TerminalRenderer {
            out: io::stdout(),
            buttons: buttons(),
            status: String::new(),
        }
    }

    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )
    }

    fn close(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    fn draw_strip(&mut self, rows: usize) -> io::Result<()> {
        let row = strip_row(rows);
        for b in &self.buttons {
            queue!(
                self.out,
                cursor::MoveTo(b.column, row),
                SetBackgroundColor(b.color),
                SetForegroundColor(Color::Black),
                Print(format!("  {}  ", b.label)),
                ResetColor
            )?;
        }
        queue!(
            self.out,
            cursor::MoveTo(0, row + 2),
            terminal::Clear(ClearType::CurrentLine),
            Print(&self.status),
            cursor::MoveTo(0, row + 3),
            Print(HELP)
        )
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, grid: &CellGrid) -> io::Result<()> {
        for (coord, state) in grid.iter() {
            queue!(
                self.out,
                cursor::MoveTo(coord.col as u16 * CELL_WIDTH, coord.row as u16),
                SetBackgroundColor(cell_color(state)),
                Print("  ")
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.draw_strip(grid.rows())?;
        self.out.flush()
    }
}

/// Runs the interactive session until the user quits.
pub fn run(config: &VisualizerConfig) -> io::Result<()> {
    let mut controller = config.controller().map_err(io::Error::other)?;
    let mut renderer = TerminalRenderer::new();
    renderer.init()?;
    let result = event_loop(&mut controller, &mut renderer, config);
    renderer.close();
    result
}

fn event_loop(
    controller: &mut Controller,
    renderer: &mut TerminalRenderer,
    config: &VisualizerConfig,
) -> io::Result<()> {
    loop {
        renderer.render(controller.grid())?;
        let action = match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("Quit requested");
                    return Ok(());
                }
                code => key_action(code),
            },
            Event::Mouse(mouse) => translate(controller.grid(), &renderer.buttons, mouse),
            Event::Resize(..) => {
                execute!(renderer.out, terminal::Clear(ClearType::All))?;
                None
            }
            _ => None,
        };
        let Some(action) = action else {
            continue;
        };
        match controller.handle(action) {
            Ok(Some(run)) => {
                let algorithm = run.algorithm();
                renderer.status = format!("running {}...", algorithm);
                let outcome = animate(run, renderer, config.step_delay)?;
                renderer.status = match outcome.path_len() {
                    Some(len) => format!(
                        "{}: path of {} cells, {} visited",
                        algorithm,
                        len,
                        outcome.parents.len()
                    ),
                    None => format!(
                        "{}: no path, {} visited",
                        algorithm,
                        outcome.parents.len()
                    ),
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring {:?}: {}", action, e),
        }
    }
}
