use crate::controller::{Controller, GameObserver};
use crate::heuristics::{SwapMove, SwapStrategy};
use tracing::{debug, info};

/// Outcome of an automated game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    /// Swaps played, in order.
    pub moves: Vec<SwapMove>,
    pub score: u32,
    pub moves_remaining: u32,
    /// True if the game reached `GameOver`, false if it stopped at `max_actions`.
    pub game_over: bool,
    /// Most detection passes with matches triggered by a single swap.
    pub longest_chain: u32,
    pub tiles_cleared: u32,
}

/// Plays `game` with `strategy` until it is over or `max_actions` swaps were made.
///
/// Every swap is resolved headlessly with `run_until_settled`. A game that is
/// still resolving when handed over is settled first.
///
/// # Examples
/// ```
/// use match3_engine::config::GameConfig;
/// use match3_engine::controller::Controller;
/// use match3_engine::heuristics::SwapStrategy;
/// use match3_engine::solver::autoplay;
///
/// let mut game = Controller::new(GameConfig::seeded(7)).unwrap();
/// let report = autoplay(&mut game, SwapStrategy::MaxImmediateScore, 100);
/// assert!(report.game_over);
/// assert_eq!(report.score, game.score());
/// ```
pub fn autoplay<O: GameObserver>(
    game: &mut Controller<O>,
    strategy: SwapStrategy,
    max_actions: usize,
) -> PlayReport {
    game.run_until_settled();

    let mut moves = Vec::new();
    let mut longest_chain = 0;
    while !game.is_game_over() && moves.len() < max_actions {
        let Some(swap) = strategy.choose(game.grid()) else {
            debug!("no matching swap left");
            break;
        };
        if !game.request_swap(swap.r1, swap.c1, swap.r2, swap.c2) {
            break;
        }
        moves.push(swap);
        game.run_until_settled();
        longest_chain = longest_chain.max(game.session().chain);
        debug!(?swap, score = game.score(), chain = game.session().chain, "swap played");
    }

    let report = PlayReport {
        moves,
        score: game.score(),
        moves_remaining: game.moves_remaining(),
        game_over: game.is_game_over(),
        longest_chain,
        tiles_cleared: game.session().tiles_cleared,
    };
    info!(
        strategy = strategy.name(),
        score = report.score,
        swaps = report.moves.len(),
        longest_chain,
        "autoplay finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::controller::EventLog;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_autoplay_runs_out_of_moves() {
        for strategy in SwapStrategy::ALL {
            let mut game = Controller::new(GameConfig::seeded(13)).unwrap();
            let report = autoplay(&mut game, strategy, 1_000);
            assert!(report.game_over);
            assert!(report.moves.len() <= 20);
            assert_eq!(report.moves_remaining, 20 - report.moves.len() as u32);
            // Every swap chosen by a strategy matches, so each scores at least once.
            assert!(report.score >= 30 * report.moves.len() as u32);
            assert!(report.longest_chain >= 1 || report.moves.is_empty());
            assert!(report.tiles_cleared >= 3 * report.moves.len() as u32);
        }
    }

    #[test]
    fn test_autoplay_respects_action_limit() {
        let mut game = Controller::new(GameConfig::seeded(13)).unwrap();
        let report = autoplay(&mut game, SwapStrategy::FirstFound, 2);
        assert!(report.moves.len() <= 2);
        if report.moves.len() == 2 {
            assert_eq!(report.moves_remaining, 18);
        }
    }

    #[test]
    fn test_autoplay_never_triggers_invalid_swap() {
        let game_config = GameConfig::seeded(31);
        let mut game = Controller::with_observer(game_config, EventLog::default()).unwrap();
        autoplay(&mut game, SwapStrategy::DeepestMatch, 1_000);
        assert_eq!(game.observer().invalid_swaps(), 0);
    }

    #[test]
    fn test_autoplay_on_deadlock_plays_nothing() {
        let grid = board_from_str_array(&[
            "02402402", "13513513", "24024024", "35135135", "40240240", "51351351", "02402402",
            "13513513",
        ])
        .unwrap();
        let mut game = Controller::from_grid(GameConfig::seeded(1), grid, ()).unwrap();
        let report = autoplay(&mut game, SwapStrategy::MaxImmediateScore, 10);
        assert!(report.moves.is_empty());
        assert_eq!(report.score, 0);
        assert_eq!(report.moves_remaining, 20);
        assert!(!report.game_over);
    }

    #[test]
    fn test_autoplay_is_reproducible() {
        let run = || {
            let mut game = Controller::new(GameConfig::seeded(77)).unwrap();
            autoplay(&mut game, SwapStrategy::MaxImmediateScore, 1_000)
        };
        assert_eq!(run(), run());
    }
}
