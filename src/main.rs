use std::collections::HashSet;
use std::io::{self, Stdout, Write};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::tty::IsTty;
use log::info;
use thiserror::Error;

use mazegen::render::{draw, solution_overlay, RenderStyle};
use mazegen::{GenerateOptions, Maze, MazeError, Point, DEFAULT_BIAS};

const DEFAULT_WIDTH: i32 = 41;
const DEFAULT_HEIGHT: i32 = 21;
const DEFAULT_CELL_WIDTH: usize = 1;
const MAX_CELL_WIDTH: usize = 2;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "mazegen", version, about = "Generate and solve mazes with an optional central den")]
struct Args {
    /// Maze width; even values are rounded up.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,
    /// Maze height; even values are rounded up.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,
    /// Width of the central den, 0 for none.
    #[arg(long, default_value_t = 0)]
    den_width: i32,
    /// Height of the central den, 0 for none.
    #[arg(long, default_value_t = 0)]
    den_height: i32,
    /// Random seed, 0 derives one from the clock.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    start_x: i32,
    #[arg(long, default_value_t = 0)]
    start_y: i32,
    #[arg(long, default_value_t = 0)]
    end_x: i32,
    #[arg(long, default_value_t = 0)]
    end_y: i32,
    #[arg(long, default_value_t = 0)]
    door_x: i32,
    #[arg(long, default_value_t = 0)]
    door_y: i32,
    /// Den door side (top, bottom, left, right); overrides --door-x/--door-y.
    #[arg(long)]
    door_side: Option<String>,
    /// Chance of carving straight on, from 0.0 to 1.0.
    #[arg(long, default_value_t = DEFAULT_BIAS)]
    bias: f64,
    /// Share of the solution to draw, from 0.0 to 1.0. Omit to skip solving.
    #[arg(long)]
    solve_ratio: Option<f64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("creating maze: {0}")]
    Create(#[source] MazeError),
    #[error("generating maze: {0}")]
    Generate(#[source] MazeError),
    #[error("solve ratio must be between 0.0 and 1.0 (got {0})")]
    SolveRatio(f64),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
    let args = Args::parse();
    let mut stdout = io::stdout();

    match run(&args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, stdout: &mut Stdout) -> Result<(), CliError> {
    if let Some(ratio) = args.solve_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(CliError::SolveRatio(ratio));
        }
    }

    let mut maze = Maze::new(args.width, args.height, args.den_width, args.den_height)
        .map_err(CliError::Create)?;
    let opts = generate_options(args).map_err(CliError::Generate)?;
    info!("seed {} (pass --seed {} to repeat)", opts.seed, opts.seed);
    maze.generate(&opts).map_err(CliError::Generate)?;

    let mut overlay = HashSet::new();
    if let Some(ratio) = args.solve_ratio {
        match maze.solve() {
            Some(path) => overlay = solution_overlay(&path, ratio),
            None => writeln!(stdout, "No solution could be found for the maze.")?,
        }
    }

    let mut style = read_render_settings();
    style.color &= stdout.is_tty();
    draw(stdout, &maze, &overlay, style)?;
    Ok(())
}

fn generate_options(args: &Args) -> mazegen::Result<GenerateOptions> {
    let mut opts = GenerateOptions::new(resolve_seed(args.seed)).with_bias(args.bias);
    opts.start = point_arg(args.start_x, args.start_y);
    opts.end = point_arg(args.end_x, args.end_y);
    opts.door = point_arg(args.door_x, args.door_y);
    match &args.door_side {
        Some(side) => opts.with_door_side_name(side),
        None => Ok(opts),
    }
}

/// A coordinate pair counts only when both halves are set.
fn point_arg(x: i32, y: i32) -> Option<Point> {
    (x > 0 && y > 0).then(|| Point::new(x, y))
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn read_render_settings() -> RenderStyle {
    let cell_width = std::env::var("MAZEGEN_CELL_WIDTH")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| (1..=MAX_CELL_WIDTH).contains(v))
        .unwrap_or(DEFAULT_CELL_WIDTH);
    let color = std::env::var("MAZEGEN_COLOR")
        .map(|v| v.trim() != "0")
        .unwrap_or(true);
    RenderStyle { cell_width, color }
}
