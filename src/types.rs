//! Newtype wrappers for board coordinates and dimensions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate on the board.
///
/// Cells order row-major, so ordered sets of cells iterate top-left to
/// bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Cell {
    type Err = crate::Error;

    /// Parse `"row,col"`, tolerating whitespace and surrounding parentheses.
    ///
    /// # Examples
    ///
    /// ```
    /// use minesweeper_ai::types::Cell;
    ///
    /// let cell: Cell = "3, 4".parse().unwrap();
    /// assert_eq!(cell, Cell::new(3, 4));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || crate::Error::ParseCell {
            input: s.to_string(),
        };
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Cell::new(row, col))
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardSizeFields")]
pub struct BoardSize {
    height: usize,
    width: usize,
}

impl BoardSize {
    /// Create a board size, validating that both dimensions are positive
    /// and that the cell count fits in a `usize`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] if either dimension is zero
    /// or the board is too large.
    pub fn new(height: usize, width: usize) -> Result<Self, crate::Error> {
        if height == 0 || width == 0 || height.checked_mul(width).is_none() {
            return Err(crate::Error::InvalidBoardSize { height, width });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells on the board. Cannot overflow, see [`BoardSize::new`].
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Check whether a cell lies on the board.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Fail with [`crate::Error::CellOutOfBounds`] unless the cell lies on the board.
    pub fn check(&self, cell: Cell) -> Result<(), crate::Error> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(crate::Error::CellOutOfBounds { cell, size: *self })
        }
    }

    /// Row-major index of a cell.
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    /// Cell at a row-major index.
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.width, index % self.width)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|index| self.cell_at(index))
    }

    /// In-bounds cells within one row and column of `cell`, excluding `cell`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minesweeper_ai::types::{BoardSize, Cell};
    ///
    /// let size = BoardSize::new(3, 3).unwrap();
    /// let corner: Vec<Cell> = size.neighbors(Cell::new(0, 0)).collect();
    /// assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    /// assert_eq!(size.neighbors(Cell::new(1, 1)).count(), 8);
    /// ```
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(self.height - 1);
        rows.flat_map(move |row| {
            let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(self.width - 1);
            cols.map(move |col| Cell::new(row, col))
        })
        .filter(move |&neighbor| neighbor != cell)
    }
}

#[derive(Deserialize)]
struct BoardSizeFields {
    height: usize,
    width: usize,
}

impl TryFrom<BoardSizeFields> for BoardSize {
    type Error = crate::Error;

    fn try_from(fields: BoardSizeFields) -> Result<Self, Self::Error> {
        Self::new(fields.height, fields.width)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(BoardSize::new(0, 5).is_err());
        assert!(BoardSize::new(5, 0).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            BoardSize::new(usize::MAX, 2),
            Err(crate::Error::InvalidBoardSize { .. })
        ));
        assert!(BoardSize::new(1 << 10, 1 << 10).is_ok());
    }

    #[test]
    fn test_deserialize_validates_dimensions() {
        let size: BoardSize = serde_json::from_str(r#"{"height":3,"width":4}"#).unwrap();
        assert_eq!(size, BoardSize::new(3, 4).unwrap());
        assert!(serde_json::from_str::<BoardSize>(r#"{"height":3,"width":0}"#).is_err());
    }

    #[test]
    fn test_index_round_trip_is_row_major() {
        let size = BoardSize::new(4, 7).unwrap();
        let cells: Vec<Cell> = size.cells().collect();
        assert_eq!(cells.len(), 28);
        assert_eq!(cells[8], Cell::new(1, 1));
        assert_eq!(size.index_of(Cell::new(3, 6)), 27);
        assert!(cells.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let size = BoardSize::new(3, 4).unwrap();
        assert_eq!(size.neighbors(Cell::new(0, 3)).count(), 3);
        assert_eq!(size.neighbors(Cell::new(1, 0)).count(), 5);
        assert_eq!(size.neighbors(Cell::new(1, 2)).count(), 8);

        let single = BoardSize::new(1, 1).unwrap();
        assert_eq!(single.neighbors(Cell::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!("1,1".parse::<Cell>().unwrap(), Cell::new(1, 1));
        assert_eq!("(2, 5)".parse::<Cell>().unwrap(), Cell::new(2, 5));
        assert!("1".parse::<Cell>().is_err());
        assert!("a,b".parse::<Cell>().is_err());
    }
}
