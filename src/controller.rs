//! Turn sequencing for a game session.
//!
//! The `Controller` owns the board, the tile factory and the session state.
//! Player actions (`request_swap`, `request_rotate`) start a resolution cycle;
//! the driver then calls `advance` once per phase, after whatever animation it
//! plays for that phase has finished:
//!
//! ```text
//! Idle -> Swapping | Rotating -> Checking -> Destroying -> Dropping -> Refilling -> Checking ...
//!                                    \-> (no match) -> Idle | GameOver
//! ```
//!
//! A headless driver can call `run_until_settled` instead; pacing never
//! changes the resulting board, score or phase.
use crate::config::GameConfig;
use crate::engine::{Grid, TileFactory};
use crate::error::EngineError;
use crate::heuristics::{find_hint, has_any_move, SwapMove};
use crate::matching::{classify, destroy_matched, find_matches, score};
use tracing::{debug, info, instrument};

/// Where the resolution cycle currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a player action.
    Idle,
    Swapping,
    Checking,
    Destroying,
    Dropping,
    Refilling,
    Rotating,
    /// Terminal until `restart`.
    GameOver,
}

/// Callbacks the presentation layer receives. Every method defaults to a no-op.
pub trait GameObserver {
    /// The board changed; `grid` has everything needed to redraw every cell.
    fn on_board_changed(&mut self, _grid: &Grid) {}

    fn on_score_changed(&mut self, _score: u32, _delta: u32) {}

    fn on_moves_changed(&mut self, _remaining: u32) {}

    fn on_game_over(&mut self) {}

    /// An adjacent swap produced no match and was swapped back.
    fn on_invalid_swap(&mut self, _r1: usize, _c1: usize, _r2: usize, _c2: usize) {}
}

impl GameObserver for () {}

/// A recorded observer callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    BoardChanged(Grid),
    ScoreChanged { score: u32, delta: u32 },
    MovesChanged(u32),
    GameOver,
    InvalidSwap(SwapMove),
}

/// Observer that records every callback in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded `InvalidSwap` events.
    pub fn invalid_swaps(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::InvalidSwap(_)))
            .count()
    }
}

impl GameObserver for EventLog {
    fn on_board_changed(&mut self, grid: &Grid) {
        self.events.push(GameEvent::BoardChanged(grid.clone()));
    }

    fn on_score_changed(&mut self, score: u32, delta: u32) {
        self.events.push(GameEvent::ScoreChanged { score, delta });
    }

    fn on_moves_changed(&mut self, remaining: u32) {
        self.events.push(GameEvent::MovesChanged(remaining));
    }

    fn on_game_over(&mut self) {
        self.events.push(GameEvent::GameOver);
    }

    fn on_invalid_swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) {
        self.events
            .push(GameEvent::InvalidSwap(SwapMove::new(r1, c1, r2, c2)));
    }
}

/// Per-game counters, reset by `restart`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Never decreases within a game.
    pub score: u32,
    pub moves_remaining: u32,
    pub phase: Phase,
    /// Player actions accepted so far.
    pub actions: u32,
    /// Detection passes that found matches during the current (or last) action.
    pub chain: u32,
    /// Distinct tiles destroyed this game.
    pub tiles_cleared: u32,
}

impl Session {
    fn new(starting_moves: u32) -> Self {
        Session {
            score: 0,
            moves_remaining: starting_moves,
            phase: Phase::Idle,
            actions: 0,
            chain: 0,
            tiles_cleared: 0,
        }
    }
}

/// Drives one game session. See the module docs for the phase cycle.
///
/// # Examples
/// ```
/// use match3_engine::config::GameConfig;
/// use match3_engine::controller::{Controller, Phase};
///
/// let mut game = Controller::new(GameConfig::seeded(3)).unwrap();
/// assert_eq!(game.phase(), Phase::Idle);
///
/// if let Some(hint) = game.hint() {
///     assert!(game.request_swap(hint.r1, hint.c1, hint.r2, hint.c2));
///     game.run_until_settled();
///     assert!(game.score() >= 30);
///     assert_eq!(game.moves_remaining(), 19);
/// }
/// ```
#[derive(Debug)]
pub struct Controller<O: GameObserver = ()> {
    config: GameConfig,
    factory: TileFactory,
    grid: Grid,
    session: Session,
    // Kept until the first detection pass after a swap so it can be reverted.
    pending_swap: Option<SwapMove>,
    observer: O,
}

impl Controller<()> {
    /// Starts a game with a fresh match-free board and no observer.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Controller::with_observer(config, ())
    }
}

impl<O: GameObserver> Controller<O> {
    /// Starts a game with a fresh match-free board, reporting to `observer`.
    pub fn with_observer(config: GameConfig, observer: O) -> Result<Self, EngineError> {
        config.validate()?;
        let mut factory = TileFactory::from_config(&config);
        let grid = factory.fill_board(config.max_fill_attempts)?;
        info!(seed = ?config.seed, kinds = config.kind_count, "new game");
        Ok(Controller {
            session: Session::new(config.starting_moves),
            config,
            factory,
            grid,
            pending_swap: None,
            observer,
        })
    }

    /// Starts a game on a prepared board. Refills still come from the
    /// configured factory.
    ///
    /// The board must already be at rest: every cell holds a live tile of a
    /// kind below `kind_count` that knows its own position, and no match is
    /// waiting to be resolved. Otherwise [`EngineError::InvalidBoard`] is
    /// returned. A deadlocked board is accepted; the first settle ends it.
    pub fn from_grid(config: GameConfig, grid: Grid, observer: O) -> Result<Self, EngineError> {
        config.validate()?;
        check_at_rest(&grid, config.kind_count)?;
        Ok(Controller {
            factory: TileFactory::from_config(&config),
            session: Session::new(config.starting_moves),
            config,
            grid,
            pending_swap: None,
            observer,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A copy of the current board.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase == Phase::GameOver
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// First matching swap on the current board, if any.
    pub fn hint(&self) -> Option<SwapMove> {
        find_hint(&self.grid)
    }

    /// Asks to swap two cells.
    ///
    /// Ignored (returns `false`, nothing changes, nothing is reported) unless
    /// the game is idle and the cells are on the board, adjacent and occupied.
    /// An accepted swap is applied at once and costs one move; whether it
    /// matches is decided on the next `advance`.
    #[instrument(skip(self))]
    pub fn request_swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> bool {
        if self.session.phase != Phase::Idle {
            debug!(phase = ?self.session.phase, "swap ignored while busy");
            return false;
        }
        let swap = SwapMove::new(r1, c1, r2, c2);
        if !swap.in_bounds() || !swap.is_adjacent() {
            debug!("swap ignored: cells not adjacent");
            return false;
        }
        if !matches!(self.grid.swap(r1, c1, r2, c2), Ok(true)) {
            debug!("swap ignored: empty cell");
            return false;
        }
        self.pending_swap = Some(swap);
        self.begin_action(Phase::Swapping);
        true
    }

    /// Asks to rotate the board a quarter turn. Ignored unless idle.
    #[instrument(skip(self))]
    pub fn request_rotate(&mut self, clockwise: bool) -> bool {
        if self.session.phase != Phase::Idle {
            debug!(phase = ?self.session.phase, "rotation ignored while busy");
            return false;
        }
        self.grid.rotate(clockwise);
        self.pending_swap = None;
        self.begin_action(Phase::Rotating);
        true
    }

    /// Moves the resolution cycle one phase forward.
    ///
    /// Calling this means every animation of the current phase has finished,
    /// so animation markers are cleared first.
    ///
    /// # Returns
    /// `false` when idle or game over (nothing to do), `true` otherwise.
    pub fn advance(&mut self) -> bool {
        match self.session.phase {
            Phase::Idle | Phase::GameOver => return false,
            Phase::Swapping | Phase::Rotating | Phase::Refilling | Phase::Checking => {
                self.grid.clear_animations();
                self.check_matches();
            }
            Phase::Destroying => {
                self.grid.clear_animations();
                self.drop_tiles();
            }
            Phase::Dropping => {
                self.grid.clear_animations();
                self.refill();
            }
        }
        true
    }

    /// Advances until the game is idle or over and returns that phase.
    pub fn run_until_settled(&mut self) -> Phase {
        while self.advance() {}
        self.session.phase
    }

    /// Throws the current game away and deals a new board. Valid in any phase.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let grid = self.factory.fill_board(self.config.max_fill_attempts)?;
        self.grid = grid;
        self.session = Session::new(self.config.starting_moves);
        self.pending_swap = None;
        info!("game restarted");
        self.observer.on_board_changed(&self.grid);
        self.observer.on_score_changed(0, 0);
        self.observer.on_moves_changed(self.session.moves_remaining);
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.session.phase, to = ?phase, "phase transition");
        self.session.phase = phase;
    }

    fn begin_action(&mut self, phase: Phase) {
        self.session.moves_remaining = self.session.moves_remaining.saturating_sub(1);
        self.session.actions += 1;
        self.session.chain = 0;
        self.set_phase(phase);
        self.observer.on_moves_changed(self.session.moves_remaining);
        self.observer.on_board_changed(&self.grid);
    }

    fn check_matches(&mut self) {
        self.set_phase(Phase::Checking);
        let mut matches = find_matches(&self.grid);

        if matches.is_empty() {
            if let Some(swap) = self.pending_swap.take() {
                if matches!(self.grid.swap(swap.r1, swap.c1, swap.r2, swap.c2), Ok(true)) {
                    debug!(?swap, "swap produced no match, reverted");
                    self.observer.on_board_changed(&self.grid);
                    self.observer
                        .on_invalid_swap(swap.r1, swap.c1, swap.r2, swap.c2);
                }
            }
            self.settle();
            return;
        }

        self.pending_swap = None;
        self.session.chain += 1;
        classify(&mut self.grid, &mut matches);
        let delta = score(&matches);
        let cleared = destroy_matched(&mut self.grid, &matches);
        self.session.score += delta;
        self.session.tiles_cleared += cleared as u32;
        debug!(
            matches = matches.len(),
            cleared,
            delta,
            chain = self.session.chain,
            "matches resolved"
        );

        self.set_phase(Phase::Destroying);
        self.observer.on_board_changed(&self.grid);
        self.observer.on_score_changed(self.session.score, delta);
    }

    fn drop_tiles(&mut self) {
        if self.grid.collapse() {
            self.set_phase(Phase::Dropping);
            self.observer.on_board_changed(&self.grid);
        } else {
            // Nothing fell: fill the holes in place and look for the next wave.
            self.grid.refill(&mut self.factory);
            self.observer.on_board_changed(&self.grid);
            self.check_matches();
        }
    }

    fn refill(&mut self) {
        self.grid.refill(&mut self.factory);
        self.set_phase(Phase::Refilling);
        self.observer.on_board_changed(&self.grid);
    }

    fn settle(&mut self) {
        debug_assert!(!self.grid.has_holes());
        debug_assert!(self.grid.positions_consistent());
        if self.session.moves_remaining == 0 || !has_any_move(&self.grid) {
            info!(
                score = self.session.score,
                actions = self.session.actions,
                moves_remaining = self.session.moves_remaining,
                "game over"
            );
            self.set_phase(Phase::GameOver);
            self.observer.on_game_over();
        } else {
            self.set_phase(Phase::Idle);
        }
    }
}

fn check_at_rest(grid: &Grid, kind_count: u8) -> Result<(), EngineError> {
    let invalid = |message: String| Err(EngineError::InvalidBoard { message });
    if grid.has_holes() {
        return invalid("every cell must hold a live tile".to_string());
    }
    if !grid.positions_consistent() {
        return invalid("a tile's position does not match its cell".to_string());
    }
    if let Some(tile) = grid.tiles().find(|t| t.kind >= kind_count) {
        return invalid(format!(
            "tile kind {} at ({}, {}) is not below kind count {}",
            tile.kind, tile.row, tile.col, kind_count
        ));
    }
    let matches = find_matches(grid);
    if !matches.is_empty() {
        return invalid(format!("{} unresolved match(es) on the board", matches.len()));
    }
    Ok(())
}
