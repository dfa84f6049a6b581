use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{BOOST_HOLD_WINDOW, EngineConfig, FRAME_POLL_INTERVAL};
use grid_snake::engine::SimulationEngine;
use grid_snake::error::EngineError;
use grid_snake::input::{self, BoostLatch, Command};
use grid_snake::pacing::TickGate;
use grid_snake::renderer;
use grid_snake::terminal_runtime::{TerminalSession, restore_terminal_after_panic};
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON engine config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board height in cells.
    #[arg(long)]
    rows: Option<u16>,

    /// Board width in cells.
    #[arg(long)]
    cols: Option<u16>,

    /// Starting speed in ticks per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Number of food items kept on the board.
    #[arg(long)]
    food: Option<usize>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; the terminal itself is taken over by the board.
    #[arg(long, default_value = "grid-snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("grid-snake: failed to open log file: {error}");
        return ExitCode::FAILURE;
    }

    let engine = match build_engine(&cli) {
        Ok(engine) => engine,
        Err(error) => {
            error!(target: "snake", "{error}");
            eprintln!("grid-snake: {error}");
            return ExitCode::from(2);
        }
    };

    install_panic_hook();

    match run(engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(target: "snake", "{error}");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)
        .map_err(io::Error::other)
}

fn build_engine(cli: &Cli) -> Result<SimulationEngine, EngineError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)?,
        None => EngineConfig::default(),
    };

    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed = speed;
    }
    if let Some(food) = cli.food {
        config.food_count = food;
    }

    match cli.seed {
        Some(seed) => SimulationEngine::with_seed(config, seed),
        None => SimulationEngine::initialize(config),
    }
}

fn run(mut engine: SimulationEngine) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let grid = engine.grid();

    // Without release events boost can only lapse once key repeats stop.
    let hold_window = if session.reports_key_release() {
        Duration::MAX
    } else {
        BOOST_HOLD_WINDOW
    };
    let mut boost = BoostLatch::new(hold_window);
    let mut gate = TickGate::new();

    loop {
        let snapshot = engine.snapshot();
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, grid, &snapshot))?;

        match input::poll_command(FRAME_POLL_INTERVAL)? {
            Some(Command::Quit) => break,
            Some(Command::Steer(direction)) => engine.request_direction(direction),
            Some(Command::Boost(true)) => boost.press(Instant::now()),
            Some(Command::Boost(false)) => boost.release(),
            None => {}
        }

        let now = Instant::now();
        engine.set_boost(boost.is_active(now));

        if gate.ready(now, engine.speed().tick_interval()) {
            engine.tick().map_err(io::Error::other)?;
        }
    }

    let stats = engine.stats();
    info!(
        target: "snake",
        "quit after {} ticks, {} resets, {} food eaten",
        stats.ticks,
        stats.resets,
        stats.food_eaten
    );
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}
