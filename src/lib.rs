//! # Match-Three Engine Library
//!
//! This library provides the rule engine for a swap-to-match tile puzzle on an
//! 8x8 board: board generation, match detection and classification, scoring,
//! gravity and refill, board rotation, move-availability checks and the turn
//! sequencing that ties them together.
//!
//! It is used by three binaries:
//! - `human_player`: Allows interactive gameplay via the command line.
//! - `ai_solver`: Plays a seeded game with a chosen strategy and prints each swap.
//! - `heuristic_evaluator`: Compares the swap strategies over many seeds.
//!
//! ## Modules
//! - `config`: Board dimensions, rule constants and `GameConfig`.
//! - `error`: `EngineError`, the crate's error type.
//! - `engine`: Tiles (`Tile`), the board (`Grid`) and random generation (`TileFactory`).
//! - `matching`: Match detection, special classification, scoring and destruction.
//! - `heuristics`: Move-availability oracle, hints and swap-selection strategies.
//! - `controller`: The resolution state machine and the observer interface.
//! - `solver`: Automated play with a swap strategy.
//! - `utils`: Parsing and printing boards as digit rows.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod matching;
pub mod solver;
pub mod utils;
