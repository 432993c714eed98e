mod term;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use grid_search_viz::config::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_STEP_DELAY};
use grid_search_viz::VisualizerConfig;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "grid_search_viz", about = "Watch BFS and DFS explore a grid")]
struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Pause between two animation steps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_STEP_DELAY.as_millis() as u64)]
    delay_ms: u64,
    /// Start from a grid drawn with `.`, `#`, `S` and `E`, one line per row
    #[arg(long)]
    layout: Option<PathBuf>,
    /// File the log is written to
    #[arg(long, default_value = "grid_search_viz.log")]
    log_file: PathBuf,
    /// Log more detail, repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // The terminal is taken over by the visualizer, so logs go to a file.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let layout = args.layout.as_ref().map(fs::read_to_string).transpose()?;
    let config = VisualizerConfig {
        rows: args.rows,
        cols: args.cols,
        step_delay: Duration::from_millis(args.delay_ms),
        layout,
    };
    log::info!(
        "Starting {}x{} visualizer, {:?} per step",
        config.rows,
        config.cols,
        config.step_delay
    );

    term::run(&config)
}
