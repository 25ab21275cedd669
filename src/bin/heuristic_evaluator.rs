use clap::Parser;
use match3_engine::config::GameArgs;
use match3_engine::controller::Controller;
use match3_engine::heuristics::SwapStrategy;
use match3_engine::solver::{autoplay, PlayReport};
use std::collections::HashMap;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare swap strategies over many seeded games", long_about = None)]
struct Args {
    #[clap(flatten)]
    game: GameArgs,

    /// Number of seeded games per strategy
    #[clap(long, default_value_t = 20)]
    games: u64,
}

#[derive(Default)]
struct Totals {
    score: u64,
    tiles_cleared: u64,
    longest_chain: u32,
    games: u64,
}

impl Totals {
    fn add(&mut self, report: &PlayReport) {
        self.score += u64::from(report.score);
        self.tiles_cleared += u64::from(report.tiles_cleared);
        self.longest_chain = self.longest_chain.max(report.longest_chain);
        self.games += 1;
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let base = match args.game.to_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid options: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let start_seed = base.seed.unwrap_or(0);

    let mut totals: HashMap<SwapStrategy, Totals> = HashMap::new();

    println!("Starting heuristic evaluation for {} games...", args.games);

    for game_idx in 0..args.games {
        let current_seed = start_seed + game_idx;
        println!("\nEvaluating Game {} (Seed: {})", game_idx, current_seed);

        for strategy in SwapStrategy::ALL {
            let mut config = base.clone();
            config.seed = Some(current_seed);
            let mut game = match Controller::new(config) {
                Ok(game) => game,
                Err(err) => {
                    eprintln!("Warning: skipping seed {}: {}", current_seed, err);
                    continue;
                }
            };
            let report = autoplay(&mut game, strategy, usize::MAX);
            println!(
                "  Strategy: {:<6}, Score: {:<6}, Swaps: {:<3}, Longest chain: {}",
                strategy.name(),
                report.score,
                report.moves.len(),
                report.longest_chain
            );
            totals.entry(strategy).or_default().add(&report);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of games evaluated: {}", args.games);
    println!(
        "Strategies evaluated: {}",
        SwapStrategy::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<&str>>()
            .join(", ")
    );
    println!("\n--- Average Scores ---");

    let mut sorted_avg_scores: Vec<(SwapStrategy, f64, f64, u32)> = totals
        .iter()
        .filter(|(_, t)| t.games > 0)
        .map(|(strategy, t)| {
            (
                *strategy,
                t.score as f64 / t.games as f64,
                t.tiles_cleared as f64 / t.games as f64,
                t.longest_chain,
            )
        })
        .collect();

    // Sort by average score descending
    sorted_avg_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy, avg_score, avg_cleared, longest_chain) in sorted_avg_scores {
        println!(
            "Strategy {:<6}: Average Score = {:.2}, Average Tiles = {:.1}, Longest Chain = {}",
            strategy.name(),
            avg_score,
            avg_cleared,
            longest_chain
        );
    }
    ExitCode::SUCCESS
}
