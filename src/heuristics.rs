use crate::config::{BOARD_COLS, BOARD_ROWS};
use crate::engine::Grid;
use crate::matching::{classify, find_matches, score, Match};
use clap::ValueEnum;

/// A swap of two cells, given as `(r1, c1)` and `(r2, c2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
}

impl SwapMove {
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        SwapMove { r1, c1, r2, c2 }
    }

    /// True when the two cells share an edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_engine::heuristics::SwapMove;
    /// assert!(SwapMove::new(2, 3, 2, 4).is_adjacent());
    /// assert!(!SwapMove::new(2, 3, 3, 4).is_adjacent());
    /// ```
    pub fn is_adjacent(&self) -> bool {
        (self.r1.abs_diff(self.r2) == 1 && self.c1 == self.c2)
            || (self.c1.abs_diff(self.c2) == 1 && self.r1 == self.r2)
    }

    /// True when both cells lie on the board.
    pub fn in_bounds(&self) -> bool {
        self.r1 < BOARD_ROWS && self.r2 < BOARD_ROWS && self.c1 < BOARD_COLS && self.c2 < BOARD_COLS
    }
}

/// Every swap of a cell with its right and bottom neighbour, in row-major order.
pub fn candidate_swaps() -> impl Iterator<Item = SwapMove> {
    (0..BOARD_ROWS).flat_map(|r| {
        (0..BOARD_COLS).flat_map(move |c| {
            let right = (c + 1 < BOARD_COLS).then(|| SwapMove::new(r, c, r, c + 1));
            let down = (r + 1 < BOARD_ROWS).then(|| SwapMove::new(r, c, r + 1, c));
            right.into_iter().chain(down)
        })
    })
}

/// Applies `swap` to a throwaway copy of `grid` and reports whether the
/// detector then finds any match.
pub fn would_swap_match(grid: &Grid, swap: SwapMove) -> bool {
    let mut test_grid = grid.clone();
    test_grid.swap(swap.r1, swap.c1, swap.r2, swap.c2).is_ok() && !find_matches(&test_grid).is_empty()
}

/// Checks whether any single adjacent swap produces a match.
///
/// Tries every cell with its right neighbour and then its bottom neighbour,
/// each on a copy of the board, and stops at the first hit. Returns `false`
/// only after every pair was tried, which means the board is deadlocked.
///
/// # Examples
///
/// ```
/// use match3_engine::heuristics::has_any_move;
/// use match3_engine::utils::board_from_str_array;
///
/// let grid = board_from_str_array(&["1121"]).unwrap();
/// assert!(has_any_move(&grid));
/// let grid = board_from_str_array(&["1212"]).unwrap();
/// assert!(!has_any_move(&grid));
/// ```
pub fn has_any_move(grid: &Grid) -> bool {
    candidate_swaps().any(|swap| would_swap_match(grid, swap))
}

/// The first matching swap in scan order, if any.
pub fn find_hint(grid: &Grid) -> Option<SwapMove> {
    candidate_swaps().find(|&swap| would_swap_match(grid, swap))
}

/// Number of adjacent swaps that produce a match.
pub fn count_moves(grid: &Grid) -> usize {
    candidate_swaps()
        .filter(|&swap| would_swap_match(grid, swap))
        .count()
}

/// Swaps on a copy, then detects and classifies the first wave of matches.
///
/// Returns `None` when the swap yields no match.
fn simulate_swap(grid: &Grid, swap: SwapMove) -> Option<Vec<Match>> {
    let mut test_grid = grid.clone();
    test_grid.swap(swap.r1, swap.c1, swap.r2, swap.c2).ok()?;
    let mut matches = find_matches(&test_grid);
    if matches.is_empty() {
        return None;
    }
    classify(&mut test_grid, &mut matches);
    Some(matches)
}

/// Chooses a swap using the Maximize Immediate Score (MIS) strategy.
///
/// Every matching swap is simulated up to its first detection pass and scored.
/// The highest score wins; on equal scores the swap clearing more tiles is
/// preferred, then the earliest in scan order. Cascades after the refill are
/// not predicted since refills are random.
///
/// # Returns
/// The predicted first-pass score and the chosen swap, or `None` when the
/// board has no matching swap.
pub fn choose_swap_mis(grid: &Grid) -> Option<(u32, SwapMove)> {
    let mut best: Option<(u32, usize, SwapMove)> = None;
    for swap in candidate_swaps() {
        let Some(matches) = simulate_swap(grid, swap) else {
            continue;
        };
        let gained = score(&matches);
        let cleared: usize = matches.iter().map(Match::len).sum();
        let better = match best {
            None => true,
            Some((best_score, best_cleared, _)) => {
                gained > best_score || (gained == best_score && cleared > best_cleared)
            }
        };
        if better {
            best = Some((gained, cleared, swap));
        }
    }
    best.map(|(gained, _, swap)| (gained, swap))
}

/// Chooses a swap using the Deepest Match strategy.
///
/// Prefers the swap whose match reaches the lowest row, since clearing low
/// tiles makes everything above fall and gives the refill more chances to
/// chain. Ties keep the earliest swap in scan order.
///
/// # Returns
/// The lowest matched row and the chosen swap, or `None` when no swap matches.
pub fn choose_swap_deepest(grid: &Grid) -> Option<(usize, SwapMove)> {
    let mut best: Option<(usize, SwapMove)> = None;
    for swap in candidate_swaps() {
        let Some(matches) = simulate_swap(grid, swap) else {
            continue;
        };
        let deepest = matches
            .iter()
            .flat_map(|m| m.tiles.iter())
            .map(|t| t.row)
            .max()
            .unwrap_or(0);
        if best.map_or(true, |(best_row, _)| deepest > best_row) {
            best = Some((deepest, swap));
        }
    }
    best
}

/// Swap-selection strategies for automated play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum SwapStrategy {
    /// The first matching swap in scan order.
    FirstFound,
    /// Highest first-pass score.
    MaxImmediateScore,
    /// Match reaching the lowest row.
    DeepestMatch,
}

impl SwapStrategy {
    pub const ALL: [SwapStrategy; 3] = [
        SwapStrategy::FirstFound,
        SwapStrategy::MaxImmediateScore,
        SwapStrategy::DeepestMatch,
    ];

    /// Short label for reports.
    pub fn name(&self) -> &'static str {
        match self {
            SwapStrategy::FirstFound => "FIRST",
            SwapStrategy::MaxImmediateScore => "MIS",
            SwapStrategy::DeepestMatch => "DEEP",
        }
    }

    /// Picks a swap for `grid`, or `None` when the board is deadlocked.
    pub fn choose(&self, grid: &Grid) -> Option<SwapMove> {
        match self {
            SwapStrategy::FirstFound => find_hint(grid),
            SwapStrategy::MaxImmediateScore => choose_swap_mis(grid).map(|(_, swap)| swap),
            SwapStrategy::DeepestMatch => choose_swap_deepest(grid).map(|(_, swap)| swap),
        }
    }
}
