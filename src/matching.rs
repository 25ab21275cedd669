//! Match detection, special-tile classification and scoring.
use crate::config::{BOARD_COLS, BOARD_ROWS, MATCH_MIN};
use crate::engine::{Grid, SpecialKind, Tile};

/// Points for every tile in a match.
pub const POINTS_PER_TILE: u32 = 10;

/// Extra points for every special tile in a match.
pub const SPECIAL_TILE_BONUS: u32 = 50;

/// Direction of the line a match was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A contiguous run of at least `MATCH_MIN` live tiles of one kind.
///
/// `tiles` holds copies of the matched tiles in scan order: left to right
/// for horizontal matches, top to bottom for vertical ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub orientation: Orientation,
    pub tiles: Vec<Tile>,
}

impl Match {
    /// Number of tiles in the run.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The kind shared by every tile in the run.
    pub fn kind(&self) -> Option<u8> {
        self.tiles.first().map(|t| t.kind)
    }

    /// `(row, col)` of every tile, in scan order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.tiles.iter().map(|t| (t.row, t.col)).collect()
    }

    /// Number of tiles carrying a special flag.
    pub fn special_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.special != SpecialKind::None)
            .count()
    }
}

/// Scans every row and column for runs of `MATCH_MIN` or more.
///
/// Rows are scanned left to right first, then columns top to bottom. Empty
/// cells and destroyed tiles end a run and are never part of one. A tile can
/// appear in both a horizontal and a vertical match. The scan keeps no state
/// between calls, so it is safe to run on throwaway copies of a board.
///
/// # Examples
///
/// ```
/// use match3_engine::matching::find_matches;
/// use match3_engine::utils::board_from_str_array;
///
/// let grid = board_from_str_array(&["111", "232"]).unwrap();
/// let matches = find_matches(&grid);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].positions(), vec![(0, 0), (0, 1), (0, 2)]);
/// ```
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut matches = Vec::new();
    for r in 0..BOARD_ROWS {
        scan_line(
            grid,
            (0..BOARD_COLS).map(|c| (r, c)),
            Orientation::Horizontal,
            &mut matches,
        );
    }
    for c in 0..BOARD_COLS {
        scan_line(
            grid,
            (0..BOARD_ROWS).map(|r| (r, c)),
            Orientation::Vertical,
            &mut matches,
        );
    }
    matches
}

fn scan_line(
    grid: &Grid,
    line: impl Iterator<Item = (usize, usize)>,
    orientation: Orientation,
    out: &mut Vec<Match>,
) {
    let mut run: Vec<Tile> = Vec::new();
    for (r, c) in line {
        match grid.cell(r, c).filter(|t| !t.destroyed) {
            Some(tile) if run.last().map_or(false, |prev| prev.kind == tile.kind) => {
                run.push(*tile);
            }
            Some(tile) => {
                close_run(&mut run, orientation, out);
                run.push(*tile);
            }
            None => close_run(&mut run, orientation, out),
        }
    }
    close_run(&mut run, orientation, out);
}

fn close_run(run: &mut Vec<Tile>, orientation: Orientation, out: &mut Vec<Match>) {
    if run.len() >= MATCH_MIN {
        out.push(Match {
            orientation,
            tiles: std::mem::take(run),
        });
    } else {
        run.clear();
    }
}

/// Tags the first tile of each match with the special kind its shape earns.
///
/// - five or more tiles: `Rainbow`
/// - exactly four: `RowClear` when the run lies in one row, else `ColClear`
/// - exactly `MATCH_MIN`: `Bomb` when the L/T shape test passes
///
/// The flag is written both to the match and to the grid cell. Afterwards
/// every matched tile's flag is refreshed from the grid, so a tile shared by
/// a horizontal and a vertical match reports the same flag in both.
pub fn classify(grid: &mut Grid, matches: &mut [Match]) {
    for m in matches.iter_mut() {
        let Some(special) = special_for(&m.tiles) else {
            continue;
        };
        let first = &mut m.tiles[0];
        first.special = special;
        if let Some(tile) = grid.cell_mut(first.row, first.col) {
            tile.special = special;
        }
    }

    for tile in matches.iter_mut().flat_map(|m| m.tiles.iter_mut()) {
        if let Some(cell) = grid.cell(tile.row, tile.col) {
            tile.special = cell.special;
        }
    }
}

fn special_for(tiles: &[Tile]) -> Option<SpecialKind> {
    let first = tiles.first()?;
    match tiles.len() {
        n if n >= 5 => Some(SpecialKind::Rainbow),
        4 => {
            if tiles.iter().all(|t| t.row == first.row) {
                Some(SpecialKind::RowClear)
            } else {
                Some(SpecialKind::ColClear)
            }
        }
        MATCH_MIN if is_l_shape(tiles) || is_t_shape(tiles) => Some(SpecialKind::Bomb),
        _ => None,
    }
}

// The shape tests look for a fourth "arm" tile next to a three-tile line, but
// only accept exactly MATCH_MIN tiles. A straight run never has that arm, so
// three-tile matches are never promoted to bombs.
// TODO: decide whether bombs should come from merged L/T groups of horizontal
// and vertical matches; that needs the detector to report merged groups.
fn is_l_shape(tiles: &[Tile]) -> bool {
    tiles.len() == MATCH_MIN
        && (has_arm(&sorted_by(tiles, row_of), row_of, col_of, 2)
            || has_arm(&sorted_by(tiles, col_of), col_of, row_of, 2))
}

fn is_t_shape(tiles: &[Tile]) -> bool {
    tiles.len() == MATCH_MIN
        && (has_arm(&sorted_by(tiles, row_of), row_of, col_of, 1)
            || has_arm(&sorted_by(tiles, col_of), col_of, row_of, 1))
}

fn row_of(t: &Tile) -> usize {
    t.row
}

fn col_of(t: &Tile) -> usize {
    t.col
}

fn sorted_by(tiles: &[Tile], key: fn(&Tile) -> usize) -> Vec<Tile> {
    let mut sorted = tiles.to_vec();
    sorted.sort_by_key(key);
    sorted
}

/// Three tiles sharing `axis`, plus a fourth off that line whose `cross`
/// coordinate lines up with the tile at `joint`.
fn has_arm(
    sorted: &[Tile],
    axis: fn(&Tile) -> usize,
    cross: fn(&Tile) -> usize,
    joint: usize,
) -> bool {
    let [a, b, c, arm, ..] = sorted else {
        return false;
    };
    let line = [a, b, c];
    axis(a) == axis(b) && axis(b) == axis(c) && axis(arm) != axis(a) && cross(arm) == cross(line[joint])
}

/// Flat score for a batch of matches: `10` per tile plus `50` per special
/// tile, summed over every match. Tiles shared by two matches count in both.
///
/// # Examples
///
/// ```
/// use match3_engine::matching::{classify, find_matches, score};
/// use match3_engine::utils::board_from_str_array;
///
/// let mut grid = board_from_str_array(&["11111"]).unwrap();
/// let mut matches = find_matches(&grid);
/// classify(&mut grid, &mut matches);
/// assert_eq!(score(&matches), 100);
/// ```
pub fn score(matches: &[Match]) -> u32 {
    matches
        .iter()
        .map(|m| POINTS_PER_TILE * m.len() as u32 + SPECIAL_TILE_BONUS * m.special_count() as u32)
        .sum()
}

/// Marks every matched tile on the grid as destroyed.
///
/// # Returns
/// The number of distinct tiles newly marked.
pub fn destroy_matched(grid: &mut Grid, matches: &[Match]) -> usize {
    let mut destroyed = 0;
    for tile in matches.iter().flat_map(|m| m.tiles.iter()) {
        if let Some(cell) = grid.cell_mut(tile.row, tile.col) {
            if !cell.destroyed {
                cell.destroyed = true;
                destroyed += 1;
            }
        }
    }
    destroyed
}
