use clap::Parser;
use match3_engine::config::{GameArgs, BOARD_ROWS};
use match3_engine::controller::Controller;
use match3_engine::error::EngineError;
use match3_engine::heuristics::SwapStrategy;
use match3_engine::solver::autoplay;
use match3_engine::utils::board_from_str_array;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play one game automatically with a swap strategy", long_about = None)]
struct Args {
    #[clap(flatten)]
    game: GameArgs,

    /// Strategy used to pick each swap
    #[clap(long, value_enum, default_value_t = SwapStrategy::MaxImmediateScore)]
    strategy: SwapStrategy,

    /// Stop after this many swaps even if moves remain
    #[clap(long, default_value_t = 1_000)]
    max_actions: usize,

    /// Optional starting board (8 lines of 8 digits); refills still use the seed
    board_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf, args: &Args) -> Result<Controller, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if lines.len() != BOARD_ROWS {
        return Err(format!(
            "Expected {} lines in board file, found {}",
            BOARD_ROWS,
            lines.len()
        ));
    }

    let grid = board_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))?;
    let config = args.game.to_config().map_err(|e| e.to_string())?;
    Controller::from_grid(config, grid, ()).map_err(|e| e.to_string())
}

fn new_game(args: &Args) -> Result<Controller, EngineError> {
    Controller::new(args.game.to_config()?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let started = match &args.board_file {
        Some(path) => read_board_file(path, &args)
            .map_err(|e| format!("Failed to load board from {}: {}", path.display(), e)),
        None => new_game(&args).map_err(|e| format!("Could not start a game: {}", e)),
    };
    let mut game = match started {
        Ok(game) => game,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    println!("Initial board state:\n{}\n", game.grid());
    println!("Playing with strategy {}...\n", args.strategy.name());

    let report = autoplay(&mut game, args.strategy, args.max_actions);

    println!("Swaps ({}):", report.moves.len());
    if report.moves.is_empty() {
        println!("  No swaps made.");
    } else {
        for (i, swap) in report.moves.iter().enumerate() {
            println!(
                "  Swap {}: ({}, {}) <-> ({}, {})",
                i + 1,
                swap.r1,
                swap.c1,
                swap.r2,
                swap.c2
            );
        }
    }
    println!("Final score: {}", report.score);
    println!("Moves remaining: {}", report.moves_remaining);
    println!("Tiles cleared: {}", report.tiles_cleared);
    println!("Longest chain: {}", report.longest_chain);
    println!(
        "Game over: {}\n",
        if report.game_over { "yes" } else { "no (action limit)" }
    );
    println!("Final board state:\n{}", game.grid());
    ExitCode::SUCCESS
}
