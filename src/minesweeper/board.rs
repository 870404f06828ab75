//! Minesweeper board with hidden mines
//!
//! The board is the oracle the knowledge base plays against: it knows where
//! the mines are and answers how many surround a revealed cell.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{BoardSize, Cell},
};

/// Dimensions and mine count for a new board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl BoardConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Validate the configuration and return the board size.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBoardSize`] if a dimension is zero
    /// - [`Error::TooManyMines`] if there are more mines than cells
    pub fn validate(&self) -> Result<BoardSize> {
        let size = BoardSize::new(self.height, self.width)?;
        if self.mines > size.cell_count() {
            return Err(Error::TooManyMines {
                mines: self.mines,
                cells: size.cell_count(),
            });
        }
        Ok(size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(8, 8, 8)
    }
}

/// Minesweeper game representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minesweeper {
    size: BoardSize,
    board: Vec<bool>,
    mines: BTreeSet<Cell>,
    mines_found: BTreeSet<Cell>,
}

impl Minesweeper {
    /// Create a board with mines placed uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self> {
        let size = config.validate()?;
        let mut mines = BTreeSet::new();
        while mines.len() != config.mines {
            let cell = Cell::new(
                rng.random_range(0..size.height()),
                rng.random_range(0..size.width()),
            );
            mines.insert(cell);
        }
        Self::from_mines(size, mines)
    }

    /// Create a board with mines at the given cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] if a mine lies outside the board.
    pub fn from_mines(size: BoardSize, mines: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let mut board = vec![false; size.cell_count()];
        let mut placed = BTreeSet::new();
        for cell in mines {
            size.check(cell)?;
            board[size.index_of(cell)] = true;
            placed.insert(cell);
        }
        Ok(Self {
            size,
            board,
            mines: placed,
            mines_found: BTreeSet::new(),
        })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Number of cells without a mine.
    pub fn safe_cell_count(&self) -> usize {
        self.size.cell_count() - self.mines.len()
    }

    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] if the cell is not on the board.
    pub fn is_mine(&self, cell: Cell) -> Result<bool> {
        self.size.check(cell)?;
        Ok(self.board[self.size.index_of(cell)])
    }

    /// Number of mines within one row and column of `cell`, not counting
    /// `cell` itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] if the cell is not on the board.
    pub fn nearby_mines(&self, cell: Cell) -> Result<usize> {
        self.size.check(cell)?;
        Ok(self
            .size
            .neighbors(cell)
            .filter(|&neighbor| self.board[self.size.index_of(neighbor)])
            .count())
    }

    /// Flag a cell as a mine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] if the cell is not on the board.
    pub fn flag(&mut self, cell: Cell) -> Result<()> {
        self.size.check(cell)?;
        self.mines_found.insert(cell);
        Ok(())
    }

    pub fn flagged(&self) -> &BTreeSet<Cell> {
        &self.mines_found
    }

    /// Whether the flagged cells are exactly the mines.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn size(height: usize, width: usize) -> BoardSize {
        BoardSize::new(height, width).unwrap()
    }

    #[test]
    fn test_random_board_places_exact_mine_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Minesweeper::new(&BoardConfig::new(8, 8, 8), &mut rng).unwrap();
        assert_eq!(board.mine_count(), 8);
        assert_eq!(board.safe_cell_count(), 56);

        let mined = board
            .size()
            .cells()
            .filter(|&cell| board.is_mine(cell).unwrap())
            .count();
        assert_eq!(mined, 8);
    }

    #[test]
    fn test_full_board_is_allowed_but_overfull_is_not() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Minesweeper::new(&BoardConfig::new(2, 2, 4), &mut rng).is_ok());
        assert!(matches!(
            Minesweeper::new(&BoardConfig::new(2, 2, 5), &mut rng),
            Err(Error::TooManyMines { mines: 5, cells: 4 })
        ));
    }

    #[test]
    fn test_oversized_config_is_rejected() {
        assert!(matches!(
            BoardConfig::new(usize::MAX, 3, 1).validate(),
            Err(Error::InvalidBoardSize { .. })
        ));
    }

    #[test]
    fn test_nearby_mines_excludes_cell_itself() {
        let board =
            Minesweeper::from_mines(size(3, 3), [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)])
                .unwrap();
        assert_eq!(board.nearby_mines(Cell::new(1, 1)).unwrap(), 2);
        assert_eq!(board.nearby_mines(Cell::new(0, 1)).unwrap(), 2);
        assert_eq!(board.nearby_mines(Cell::new(0, 2)).unwrap(), 1);
        assert_eq!(board.nearby_mines(Cell::new(2, 0)).unwrap(), 1);
    }

    #[test]
    fn test_won_requires_exact_flags() {
        let mut board = Minesweeper::from_mines(size(2, 2), [Cell::new(1, 1)]).unwrap();
        assert!(!board.won());
        board.flag(Cell::new(1, 1)).unwrap();
        assert!(board.won());
        board.flag(Cell::new(0, 0)).unwrap();
        assert!(!board.won());
    }

    #[test]
    fn test_out_of_bounds_queries_fail() {
        let board = Minesweeper::from_mines(size(2, 2), Vec::<Cell>::new()).unwrap();
        assert!(board.is_mine(Cell::new(2, 0)).is_err());
        assert!(board.nearby_mines(Cell::new(0, 2)).is_err());
    }
}
