//! Core board model for the match-three puzzle.
//!
//! This module defines the pieces every other module works on:
//! - `Tile`: a single piece with a kind, an optional special flag, its grid
//!   position, a destroyed flag and an animation marker.
//! - `Grid`: the fixed `BOARD_ROWS` x `BOARD_COLS` store of optional tiles,
//!   plus the board transforms (swap, collapse, refill, rotate).
//! - `TileFactory`: seeded random generation of tiles and match-free boards.
use crate::config::{GameConfig, BOARD_COLS, BOARD_ROWS};
use crate::error::EngineError;
use crate::heuristics::has_any_move;
use crate::matching::find_matches;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, warn};

// Rotation maps rows onto columns, so the board must be square.
const _: () = assert!(BOARD_ROWS == BOARD_COLS);

/// Special behaviour a tile picked up when it was classified as part of a long
/// or shaped match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// An ordinary tile.
    #[default]
    None,
    /// Clears its row when destroyed.
    RowClear,
    /// Clears its column when destroyed.
    ColClear,
    /// Clears the surrounding area when destroyed.
    Bomb,
    /// Clears every tile of one kind when destroyed.
    Rainbow,
}

impl SpecialKind {
    /// Single-character marker used in text renderings.
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_engine::engine::SpecialKind;
    /// assert_eq!(SpecialKind::None.to_char(), ' ');
    /// assert_eq!(SpecialKind::Rainbow.to_char(), '@');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            SpecialKind::None => ' ',
            SpecialKind::RowClear => '-',
            SpecialKind::ColClear => '|',
            SpecialKind::Bomb => '*',
            SpecialKind::Rainbow => '@',
        }
    }
}

/// Animation the presentation layer should play for a tile.
///
/// The engine only sets these markers; how long an animation runs is up to
/// whoever drives the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimState {
    #[default]
    Idle,
    Swapping,
    Dropping,
    Rotating,
}

/// A single piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Match category, in `0..kind_count`.
    pub kind: u8,
    pub special: SpecialKind,
    /// Row of the cell holding this tile.
    pub row: usize,
    /// Column of the cell holding this tile.
    pub col: usize,
    /// Set when the tile was part of a resolved match and awaits removal.
    pub destroyed: bool,
    pub anim: AnimState,
}

impl Tile {
    /// Creates an ordinary, idle tile of `kind` at `(row, col)`.
    pub fn new(kind: u8, row: usize, col: usize) -> Self {
        Tile {
            kind,
            special: SpecialKind::None,
            row,
            col,
            destroyed: false,
            anim: AnimState::Idle,
        }
    }

    /// Returns the ANSI background colour code for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self.kind % 6 {
            0 => "41",
            1 => "42",
            2 => "43",
            3 => "44",
            4 => "45",
            _ => "46",
        }
    }
}

/// Generates tiles with uniformly random kinds.
///
/// Seeding the factory makes every board, refill and cascade of a game
/// reproducible.
#[derive(Clone, Debug)]
pub struct TileFactory {
    rng: SmallRng,
    kind_count: u8,
}

impl TileFactory {
    /// Creates a factory drawing kinds from `0..kind_count`.
    ///
    /// With `seed == None` the RNG is seeded from system entropy.
    pub fn new(kind_count: u8, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        TileFactory {
            rng,
            kind_count: kind_count.max(1),
        }
    }

    /// Creates a factory from a game configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        TileFactory::new(config.kind_count, config.seed)
    }

    /// Number of distinct kinds this factory produces.
    pub fn kind_count(&self) -> u8 {
        self.kind_count
    }

    /// Draws a kind uniformly from `0..kind_count`.
    pub fn random_kind(&mut self) -> u8 {
        self.rng.gen_range(0..self.kind_count)
    }

    /// Creates a fresh ordinary tile with a random kind at `(row, col)`.
    pub fn new_tile(&mut self, row: usize, col: usize) -> Tile {
        Tile::new(self.random_kind(), row, col)
    }

    /// Builds a fully populated board that contains no match but has at
    /// least one matching swap.
    ///
    /// Every cell is filled, then, while the detector reports any match or the
    /// board is deadlocked, every tile's kind is re-rolled in place. After
    /// `max_attempts` re-rolls the fill gives up with
    /// [`EngineError::UnsatisfiableBoard`].
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_engine::engine::TileFactory;
    /// use match3_engine::heuristics::has_any_move;
    /// use match3_engine::matching::find_matches;
    ///
    /// let mut factory = TileFactory::new(6, Some(42));
    /// let grid = factory.fill_board(10_000).unwrap();
    /// assert!(find_matches(&grid).is_empty());
    /// assert!(has_any_move(&grid));
    /// ```
    pub fn fill_board(&mut self, max_attempts: u32) -> Result<Grid, EngineError> {
        let mut grid = Grid::new_empty();
        for r in 0..BOARD_ROWS {
            for c in 0..BOARD_COLS {
                grid.cells[r][c] = Some(self.new_tile(r, c));
            }
        }

        let mut attempts = 0;
        while !find_matches(&grid).is_empty() || !has_any_move(&grid) {
            if attempts >= max_attempts {
                warn!(attempts, kind_count = self.kind_count, "initial fill found no playable board");
                return Err(EngineError::UnsatisfiableBoard { attempts });
            }
            for tile in grid.cells.iter_mut().flatten().flatten() {
                tile.kind = self.random_kind();
            }
            attempts += 1;
        }
        debug!(attempts, "filled playable match-free board");
        Ok(grid)
    }
}

/// The game board: a fixed grid of optional tiles.
///
/// The cell a tile sits in is the source of truth for its position; every
/// operation that moves a tile rewrites the tile's `row`/`col` to match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[Option<Tile>; BOARD_COLS]; BOARD_ROWS],
}

impl Grid {
    /// Creates a board where every cell is empty.
    ///
    /// # Examples
    /// ```
    /// use match3_engine::engine::Grid;
    /// let grid = Grid::new_empty();
    /// assert_eq!(grid.get(0, 0).unwrap(), None);
    /// ```
    pub fn new_empty() -> Self {
        Grid {
            cells: [[None; BOARD_COLS]; BOARD_ROWS],
        }
    }

    /// Returns `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (BOARD_ROWS, BOARD_COLS)
    }

    fn check_bounds(row: usize, col: usize) -> Result<(), EngineError> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    /// Returns the tile at `(row, col)`, or `None` for an empty cell.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&Tile>, EngineError> {
        Self::check_bounds(row, col)?;
        Ok(self.cells[row][col].as_ref())
    }

    /// Places `tile` (or clears the cell with `None`) at `(row, col)`.
    ///
    /// The stored tile's position is rewritten to `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) -> Result<(), EngineError> {
        Self::check_bounds(row, col)?;
        self.cells[row][col] = tile.map(|mut t| {
            t.row = row;
            t.col = col;
            t
        });
        Ok(())
    }

    /// Unchecked read used by the scanners. Panics outside the board.
    pub(crate) fn cell(&self, row: usize, col: usize) -> Option<&Tile> {
        self.cells[row][col].as_ref()
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        self.cells[row][col].as_mut()
    }

    /// Kind of the tile at `(row, col)` if it is present and not destroyed.
    pub fn live_kind(&self, row: usize, col: usize) -> Option<u8> {
        self.cells[row][col]
            .filter(|t| !t.destroyed)
            .map(|t| t.kind)
    }

    /// Iterates over every present tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    /// Per-cell `(kind, special)` content, ignoring positions and animation.
    pub fn layout(&self) -> [[Option<(u8, SpecialKind)>; BOARD_COLS]; BOARD_ROWS] {
        let mut out = [[None; BOARD_COLS]; BOARD_ROWS];
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                out[r][c] = cell.map(|t| (t.kind, t.special));
            }
        }
        out
    }

    /// True when every tile's `(row, col)` equals the cell holding it.
    pub fn positions_consistent(&self) -> bool {
        self.cells.iter().enumerate().all(|(r, row)| {
            row.iter()
                .enumerate()
                .all(|(c, cell)| cell.map_or(true, |t| t.row == r && t.col == c))
        })
    }

    /// True when some cell is empty or holds a destroyed tile.
    pub fn has_holes(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|cell| cell.map_or(true, |t| t.destroyed))
    }

    /// True when no tile carries an animation marker.
    pub fn all_idle(&self) -> bool {
        self.tiles().all(|t| t.anim == AnimState::Idle)
    }

    /// Resets every tile's animation marker to `Idle`.
    pub fn clear_animations(&mut self) {
        for tile in self.cells.iter_mut().flatten().flatten() {
            tile.anim = AnimState::Idle;
        }
    }

    /// Exchanges the tiles at two cells and marks both as swapping.
    ///
    /// Adjacency is not checked here. If either cell is empty nothing happens.
    ///
    /// # Returns
    /// `Ok(true)` when the tiles were exchanged, `Ok(false)` when a cell was empty.
    pub fn swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<bool, EngineError> {
        Self::check_bounds(r1, c1)?;
        Self::check_bounds(r2, c2)?;
        let (Some(mut first), Some(mut second)) = (self.cells[r1][c1], self.cells[r2][c2]) else {
            return Ok(false);
        };

        first.row = r2;
        first.col = c2;
        first.anim = AnimState::Swapping;
        second.row = r1;
        second.col = c1;
        second.anim = AnimState::Swapping;

        self.cells[r1][c1] = Some(second);
        self.cells[r2][c2] = Some(first);
        Ok(true)
    }

    /// Lets tiles fall into empty or destroyed cells below them.
    ///
    /// Each column is scanned bottom-up; every hole pulls the nearest live tile
    /// above it straight into place. Destroyed tiles are never moved and are
    /// dropped when a falling tile lands on them.
    ///
    /// # Returns
    /// Whether any tile moved.
    pub fn collapse(&mut self) -> bool {
        let mut moved = false;
        for c in 0..BOARD_COLS {
            for r in (0..BOARD_ROWS).rev() {
                if self.live_kind(r, c).is_some() {
                    continue;
                }
                for above in (0..r).rev() {
                    if let Some(mut tile) = self.cells[above][c].filter(|t| !t.destroyed) {
                        self.cells[above][c] = None;
                        tile.row = r;
                        tile.anim = AnimState::Dropping;
                        self.cells[r][c] = Some(tile);
                        moved = true;
                        break;
                    }
                }
            }
        }
        debug_assert!(self.positions_consistent());
        moved
    }

    /// Replaces every empty or destroyed cell with a fresh tile.
    ///
    /// No anti-match check is made; the next detection pass picks up any match
    /// the new tiles form.
    pub fn refill(&mut self, factory: &mut TileFactory) {
        for r in 0..BOARD_ROWS {
            for c in 0..BOARD_COLS {
                if self.live_kind(r, c).is_none() {
                    self.cells[r][c] = Some(factory.new_tile(r, c));
                }
            }
        }
    }

    /// Rotates the whole board a quarter turn.
    ///
    /// Live tiles move to their rotated cell and are marked rotating. Destroyed
    /// tiles are discarded.
    pub fn rotate(&mut self, clockwise: bool) {
        let mut rotated = [[None; BOARD_COLS]; BOARD_ROWS];
        for r in 0..BOARD_ROWS {
            for c in 0..BOARD_COLS {
                if let Some(mut tile) = self.cells[r][c].filter(|t| !t.destroyed) {
                    let (new_r, new_c) = if clockwise {
                        (c, BOARD_ROWS - 1 - r)
                    } else {
                        (BOARD_COLS - 1 - c, r)
                    };
                    tile.row = new_r;
                    tile.col = new_c;
                    tile.anim = AnimState::Rotating;
                    rotated[new_r][new_c] = Some(tile);
                }
            }
        }
        self.cells = rotated;
        debug_assert!(self.positions_consistent());
    }

    /// Renders the board for a terminal, optionally highlighting one cell.
    ///
    /// Each cell is a separator followed by two characters on a coloured
    /// background: the kind digit and the special marker. Empty cells are
    /// blank; destroyed tiles show `xx`. A highlighted cell is wrapped in
    /// brackets, the closing one taking the next separator's place so the
    /// columns stay under their headers.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..BOARD_COLS {
            output.push_str(&format!(" {:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..BOARD_ROWS {
            output.push_str(&format!("{:<2}", r_idx));
            for c_idx in 0..BOARD_COLS {
                let separator = if pos == Some((r_idx, c_idx)) {
                    '['
                } else if c_idx > 0 && pos == Some((r_idx, c_idx - 1)) {
                    ']'
                } else {
                    ' '
                };
                output.push(separator);
                match self.cells[r_idx][c_idx] {
                    Some(tile) => {
                        let content = if tile.destroyed {
                            "xx".to_string()
                        } else {
                            format!("{}{}", tile.kind, tile.special.to_char())
                        };
                        output.push_str(&format!(
                            "\x1b[1;{}m{}\x1b[m",
                            tile.to_ansi_color_code(),
                            content
                        ));
                    }
                    None => output.push_str("  "),
                }
            }
            if pos == Some((r_idx, BOARD_COLS - 1)) {
                output.push(']');
            }
            if r_idx < BOARD_ROWS - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{board_from_str_array, board_to_strings};

    const DEADLOCK: [&str; 8] = [
        "02402402", "13513513", "24024024", "35135135", "40240240", "51351351", "02402402",
        "13513513",
    ];

    #[test]
    fn test_new_empty_grid() {
        let grid = Grid::new_empty();
        assert_eq!(grid.dimensions(), (8, 8));
        for r in 0..BOARD_ROWS {
            for c in 0..BOARD_COLS {
                assert_eq!(grid.get(r, c).unwrap(), None);
            }
        }
        assert!(grid.has_holes());
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut grid = Grid::new_empty();
        assert_eq!(
            grid.get(BOARD_ROWS, 0),
            Err(EngineError::OutOfBounds { row: BOARD_ROWS, col: 0 })
        );
        assert!(grid.set(0, BOARD_COLS, Some(Tile::new(1, 0, 0))).is_err());
    }

    #[test]
    fn test_set_rewrites_position() {
        let mut grid = Grid::new_empty();
        grid.set(3, 5, Some(Tile::new(2, 0, 0))).unwrap();
        let tile = grid.get(3, 5).unwrap().unwrap();
        assert_eq!((tile.row, tile.col, tile.kind), (3, 5, 2));
        assert!(grid.positions_consistent());

        grid.set(3, 5, None).unwrap();
        assert_eq!(grid.get(3, 5).unwrap(), None);
    }

    #[test]
    fn test_random_kind_in_range() {
        let mut factory = TileFactory::new(4, Some(1));
        for _ in 0..500 {
            assert!(factory.random_kind() < 4);
        }
    }

    #[test]
    fn test_new_tile_defaults() {
        let mut factory = TileFactory::new(6, Some(9));
        let tile = factory.new_tile(2, 7);
        assert_eq!((tile.row, tile.col), (2, 7));
        assert_eq!(tile.special, SpecialKind::None);
        assert_eq!(tile.anim, AnimState::Idle);
        assert!(!tile.destroyed);
    }

    #[test]
    fn test_fill_board_is_match_free_and_full() {
        for seed in 0..20 {
            let mut factory = TileFactory::new(6, Some(seed));
            let grid = factory.fill_board(10_000).unwrap();
            assert!(find_matches(&grid).is_empty(), "seed {} left a match", seed);
            assert!(has_any_move(&grid), "seed {} dealt a deadlock", seed);
            assert!(!grid.has_holes());
            assert!(grid.positions_consistent());
        }
    }

    #[test]
    fn test_fill_board_deterministic_with_seed() {
        let a = TileFactory::new(6, Some(123)).fill_board(10_000).unwrap();
        let b = TileFactory::new(6, Some(123)).fill_board(10_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_board_unsatisfiable() {
        // A single kind always forms runs.
        let mut factory = TileFactory::new(1, Some(0));
        assert_eq!(
            factory.fill_board(5),
            Err(EngineError::UnsatisfiableBoard { attempts: 5 })
        );
    }

    #[test]
    fn test_swap_exchanges_and_marks() {
        let mut grid = board_from_str_array(&DEADLOCK).unwrap();
        assert!(grid.swap(0, 0, 0, 1).unwrap());
        let left = grid.get(0, 0).unwrap().unwrap();
        let right = grid.get(0, 1).unwrap().unwrap();
        assert_eq!((left.kind, right.kind), (2, 0));
        assert_eq!(left.anim, AnimState::Swapping);
        assert_eq!(right.anim, AnimState::Swapping);
        assert!(grid.positions_consistent());
    }

    #[test]
    fn test_swap_twice_restores_content() {
        let start = board_from_str_array(&DEADLOCK).unwrap();
        let mut grid = start.clone();
        grid.swap(4, 4, 5, 4).unwrap();
        grid.swap(4, 4, 5, 4).unwrap();
        assert_eq!(grid.layout(), start.layout());
        assert!(!grid.all_idle());
    }

    #[test]
    fn test_swap_with_empty_cell_is_noop() {
        let mut grid = board_from_str_array(&["12", "3."]).unwrap();
        let before = grid.clone();
        assert!(!grid.swap(1, 0, 1, 1).unwrap());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_collapse_pulls_tiles_down() {
        let mut grid = board_from_str_array(&["1", ".", "2", ".", "3"]).unwrap();
        assert!(grid.collapse());
        let rows = board_to_strings(&grid);
        assert_eq!(rows[5], "1.......");
        assert_eq!(rows[6], "2.......");
        assert_eq!(rows[7], "3.......");
        assert_eq!(rows[0], "........");
        assert_eq!(grid.get(7, 0).unwrap().unwrap().anim, AnimState::Dropping);
        assert!(grid.positions_consistent());
    }

    #[test]
    fn test_collapse_skips_destroyed_tiles() {
        let mut grid = board_from_str_array(&[
            "4", "5", ".", ".", ".", "1", "2", "3",
        ])
        .unwrap();
        for r in 5..8 {
            grid.cell_mut(r, 0).unwrap().destroyed = true;
        }
        assert!(grid.collapse());
        assert_eq!(grid.live_kind(7, 0), Some(5));
        assert_eq!(grid.live_kind(6, 0), Some(4));
        assert_eq!(grid.live_kind(5, 0), None);
    }

    #[test]
    fn test_collapse_terminates() {
        let mut grid = board_from_str_array(&["1.2", ".3.", "..4", "5..", ".6."]).unwrap();
        let mut passes = 0;
        while grid.collapse() {
            passes += 1;
            assert!(passes < 10);
        }
        // No hole may have a live tile above it.
        for c in 0..BOARD_COLS {
            for r in 0..BOARD_ROWS {
                if grid.live_kind(r, c).is_none() {
                    assert!((0..r).all(|above| grid.live_kind(above, c).is_none()));
                }
            }
        }
    }

    #[test]
    fn test_collapse_on_settled_grid() {
        let mut grid = board_from_str_array(&DEADLOCK).unwrap();
        assert!(!grid.collapse());
        assert!(grid.all_idle());
    }

    #[test]
    fn test_refill_fills_holes_only() {
        let mut grid = board_from_str_array(&["1", "."]).unwrap();
        grid.cell_mut(0, 0).unwrap().destroyed = true;
        let mut factory = TileFactory::new(6, Some(3));
        grid.refill(&mut factory);
        assert!(!grid.has_holes());
        assert!(grid.positions_consistent());
        assert!(grid.tiles().all(|t| !t.destroyed && t.kind < 6));
    }

    #[test]
    fn test_rotate_clockwise_mapping() {
        let mut grid = board_from_str_array(&["1"]).unwrap();
        grid.rotate(true);
        assert_eq!(grid.live_kind(0, BOARD_COLS - 1), Some(1));
        assert_eq!(grid.get(0, BOARD_COLS - 1).unwrap().unwrap().anim, AnimState::Rotating);

        let mut grid = board_from_str_array(&["1"]).unwrap();
        grid.rotate(false);
        assert_eq!(grid.live_kind(BOARD_ROWS - 1, 0), Some(1));
        assert!(grid.positions_consistent());
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let start = TileFactory::new(6, Some(77)).fill_board(10_000).unwrap();
        let mut grid = start.clone();
        for _ in 0..4 {
            grid.rotate(true);
        }
        assert_eq!(grid.layout(), start.layout());
        for tile in grid.tiles() {
            let before = start.get(tile.row, tile.col).unwrap().unwrap();
            assert_eq!(before.kind, tile.kind);
        }
    }

    #[test]
    fn test_rotate_drops_destroyed_tiles() {
        let mut grid = board_from_str_array(&["12"]).unwrap();
        grid.cell_mut(0, 1).unwrap().destroyed = true;
        grid.rotate(true);
        assert_eq!(grid.tiles().count(), 1);
        assert!(grid.tiles().all(|t| !t.destroyed));
    }

    #[test]
    fn test_clear_animations() {
        let mut grid = board_from_str_array(&DEADLOCK).unwrap();
        grid.rotate(false);
        assert!(!grid.all_idle());
        grid.clear_animations();
        assert!(grid.all_idle());
    }

    #[test]
    fn test_display_board_formatting() {
        let grid = board_from_str_array(&DEADLOCK).unwrap();
        let display_str = format!("{}", grid);
        assert!(display_str.starts_with("   0  1  2"));
        assert_eq!(display_str.lines().count(), BOARD_ROWS + 1);
        let highlighted = grid.to_string_with_highlight(Some((2, 3)));
        assert!(highlighted.contains('['));
    }

    fn strip_ansi(s: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for ch in s.chars() {
            match ch {
                '\x1b' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if in_escape => {}
                _ => plain.push(ch),
            }
        }
        plain
    }

    #[test]
    fn test_highlight_keeps_columns_aligned() {
        let mut grid = board_from_str_array(&DEADLOCK).unwrap();
        grid.cell_mut(7, 7).unwrap().destroyed = true;
        let plain = strip_ansi(&grid.to_string());

        for pos in [(2, 3), (0, 0), (7, 7)] {
            let rendered = strip_ansi(&grid.to_string_with_highlight(Some(pos)));
            // Blanking the brackets must give back the plain board, so no
            // cell moved away from its header.
            let unbracketed: String = rendered
                .lines()
                .map(|line| line.replace(['[', ']'], " ").trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n");
            let plain_trimmed: String = plain
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n");
            assert_eq!(unbracketed, plain_trimmed, "highlight {:?} shifted a column", pos);
        }

        let rendered = strip_ansi(&grid.to_string_with_highlight(Some((2, 3))));
        let row = rendered.lines().nth(3).unwrap();
        assert_eq!(&row[11..15], "[2 ]");

        let rendered = strip_ansi(&grid.to_string_with_highlight(Some((7, 7))));
        assert!(rendered.lines().last().unwrap().ends_with("[xx]"));
    }
}
