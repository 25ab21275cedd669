//! Board dimensions, rule constants and per-game configuration.

use crate::error::EngineError;
use clap::Args;

/// Number of rows on the board.
pub const BOARD_ROWS: usize = 8;

/// Number of columns on the board.
pub const BOARD_COLS: usize = 8;

/// Minimum run length that counts as a match.
pub const MATCH_MIN: usize = 3;

/// Number of distinct tile kinds in a default game.
pub const DEFAULT_KIND_COUNT: u8 = 6;

/// Moves granted at the start of a default game.
pub const DEFAULT_MOVES: u32 = 20;

/// Full-board re-rolls allowed before the initial fill gives up.
pub const DEFAULT_MAX_FILL_ATTEMPTS: u32 = 10_000;

/// Largest supported kind count (text boards use one digit per kind).
pub const MAX_KIND_COUNT: u8 = 9;

/// Settings for one game session.
///
/// # Examples
/// ```
/// use match3_engine::config::GameConfig;
/// let config = GameConfig::seeded(7);
/// assert_eq!(config.seed, Some(7));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Tile kinds are drawn uniformly from `0..kind_count`.
    pub kind_count: u8,
    /// Moves available at game start and after every restart.
    pub starting_moves: u32,
    /// Cap on full re-rolls while searching for a match-free starting board.
    pub max_fill_attempts: u32,
    /// Seed for the tile RNG. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            kind_count: DEFAULT_KIND_COUNT,
            starting_moves: DEFAULT_MOVES,
            max_fill_attempts: DEFAULT_MAX_FILL_ATTEMPTS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default rules with a fixed RNG seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    /// Checks that the configuration can drive a game.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.kind_count == 0 || self.kind_count > MAX_KIND_COUNT {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "kind_count must be in 1..={}, got {}",
                    MAX_KIND_COUNT, self.kind_count
                ),
            });
        }
        if self.max_fill_attempts == 0 {
            return Err(EngineError::InvalidConfig {
                message: "max_fill_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Command-line options shared by the binaries.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// RNG seed; omit for a random game
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Moves available per game
    #[clap(short, long, default_value_t = DEFAULT_MOVES)]
    pub moves: u32,

    /// Number of distinct tile kinds (1-9)
    #[clap(short, long, default_value_t = DEFAULT_KIND_COUNT)]
    pub kinds: u8,
}

impl GameArgs {
    /// Builds a validated configuration from the parsed options.
    pub fn to_config(&self) -> Result<GameConfig, EngineError> {
        let config = GameConfig {
            kind_count: self.kinds,
            starting_moves: self.moves,
            seed: self.seed,
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
