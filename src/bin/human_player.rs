use clap::Parser;
use match3_engine::config::{GameArgs, BOARD_COLS, BOARD_ROWS};
use match3_engine::controller::{Controller, EventLog, GameEvent};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the match-three puzzle in the terminal", long_about = None)]
struct Args {
    #[clap(flatten)]
    game: GameArgs,
}

const HELP: &str = "Commands: 'r1 c1 r2 c2' swap two adjacent cells, 'cw'/'ccw' rotate the board, \
'h' hint, 'n' new game, 'q' quit.";

fn report_events(game: &mut Controller<EventLog>) {
    for event in game.observer_mut().take() {
        match event {
            GameEvent::InvalidSwap(swap) => println!(
                "No match: ({}, {}) and ({}, {}) were swapped back.",
                swap.r1, swap.c1, swap.r2, swap.c2
            ),
            GameEvent::ScoreChanged { delta, .. } if delta > 0 => println!("+{} points", delta),
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = match args.game.to_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid options: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let mut game = match Controller::with_observer(config, EventLog::default()) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Could not start a game: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("Welcome to Match Three!");
    println!("{}", HELP);

    loop {
        game.run_until_settled();
        report_events(&mut game);

        println!("---------------------");
        let session = game.session();
        println!(
            "Moves left: {}, Score: {}, Last chain: {}",
            session.moves_remaining, session.score, session.chain
        );
        println!("{}", game.grid());

        if game.is_game_over() {
            println!();
            println!("---------------------");
            println!("GAME OVER!");
            println!("Final Score: {}", game.score());
            println!("Tiles cleared: {}", game.session().tiles_cleared);
            println!("---------------------");
            print!("Enter 'n' for a new game or anything else to quit: ");
        } else {
            print!("Enter your move: ");
        }
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }
        let trimmed_input = input.trim();

        if game.is_game_over() && trimmed_input != "n" {
            break;
        }

        match trimmed_input {
            "q" => break,
            "n" => {
                if let Err(err) = game.restart() {
                    eprintln!("Could not restart: {}", err);
                    return ExitCode::FAILURE;
                }
                game.observer_mut().take();
                println!("New game started.");
                continue;
            }
            "h" => {
                match game.hint() {
                    Some(hint) => println!(
                        "Try swapping ({}, {}) with ({}, {}).",
                        hint.r1, hint.c1, hint.r2, hint.c2
                    ),
                    None => println!("No matching swap on this board."),
                }
                continue;
            }
            "cw" | "ccw" => {
                game.request_rotate(trimmed_input == "cw");
                continue;
            }
            _ => {}
        }

        let coords: Vec<usize> = trimmed_input
            .split_whitespace()
            .map(|part| part.parse::<usize>())
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        let [r1, c1, r2, c2] = coords[..] else {
            println!("Invalid input format. {}", HELP);
            continue;
        };
        if r1.max(r2) >= BOARD_ROWS || c1.max(c2) >= BOARD_COLS {
            println!(
                "Invalid coordinates: Rows must be below {} and columns below {}.",
                BOARD_ROWS, BOARD_COLS
            );
            continue;
        }
        if !game.request_swap(r1, c1, r2, c2) {
            println!("Ignored: ({}, {}) and ({}, {}) are not neighbours.", r1, c1, r2, c2);
        }
    }

    println!("Thanks for playing!");
    ExitCode::SUCCESS
}
