use crate::config::{BOARD_COLS, BOARD_ROWS};
use crate::engine::{Grid, Tile};
use crate::error::EngineError;

/// Parses an array of string slices into a `Grid`.
///
/// Each string slice in the input array represents a row on the board, starting from row 0.
/// If fewer than `BOARD_ROWS` rows are provided, the remaining rows are left empty.
/// Similarly, if a row string is shorter than `BOARD_COLS` characters, the rest of that
/// row is left empty.
///
/// Valid characters are:
/// - `'0'..='9'`: an ordinary tile of that kind
/// - `'.'`: an empty cell
///
/// Any other character will result in an error.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful. Every tile's position matches its cell.
/// * `Err(EngineError::ParseBoard)` if:
///     - The number of rows in `s` exceeds `BOARD_ROWS`.
///     - Any row string's character length exceeds `BOARD_COLS`.
///     - An unrecognized character is encountered.
///
/// # Examples
/// ```
/// use match3_engine::utils::board_from_str_array;
///
/// let grid = board_from_str_array(&["012", "3.5"]).unwrap();
/// assert_eq!(grid.live_kind(0, 2), Some(2));
/// assert_eq!(grid.live_kind(1, 1), None);
/// assert_eq!(grid.live_kind(2, 0), None); // Row 2 is entirely empty
///
/// assert!(board_from_str_array(&["0X1"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Grid, EngineError> {
    if s.len() > BOARD_ROWS {
        return Err(EngineError::ParseBoard {
            message: format!(
                "Invalid number of rows. Expected at most {}, found {}",
                BOARD_ROWS,
                s.len()
            ),
        });
    }

    let mut grid = Grid::new_empty();

    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() > BOARD_COLS {
            return Err(EngineError::ParseBoard {
                message: format!(
                    "Row {} is too long. Expected at most {} characters, found {}",
                    r,
                    BOARD_COLS,
                    row_str.chars().count()
                ),
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            let tile = match ch {
                '.' => None,
                _ => match ch.to_digit(10) {
                    Some(kind) => Some(Tile::new(kind as u8, r, c)),
                    None => {
                        return Err(EngineError::ParseBoard {
                            message: format!(
                                "Unrecognized character '{}' in row {} col {}",
                                ch, r, c
                            ),
                        })
                    }
                },
            };
            grid.set(r, c, tile)?;
        }
    }
    Ok(grid)
}

/// Renders a grid back into digit rows.
///
/// Live tiles become their kind digit, empty cells `'.'` and destroyed tiles `'x'`.
/// Special flags and animation markers are not represented.
pub fn board_to_strings(grid: &Grid) -> Vec<String> {
    (0..BOARD_ROWS)
        .map(|r| {
            (0..BOARD_COLS)
                .map(|c| match grid.cell(r, c) {
                    None => '.',
                    Some(tile) if tile.destroyed => 'x',
                    Some(tile) => char::from_digit(u32::from(tile.kind), 10).unwrap_or('?'),
                })
                .collect()
        })
        .collect()
}
