//! Exact-count constraints over board cells

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// Logical statement about a Minesweeper board: exactly `count` of `cells`
/// are mines.
///
/// Two sentences are equal when their cell sets and counts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence from any collection of cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use minesweeper_ai::{minesweeper::Sentence, types::Cell};
    ///
    /// let sentence = Sentence::new([Cell::new(0, 1), Cell::new(1, 1)], 1);
    /// assert_eq!(sentence.to_string(), "{(0, 1), (1, 1)} = 1");
    /// ```
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A sentence over no cells says nothing.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `count` fits within the cells (`count <= |cells|`).
    pub fn is_consistent(&self) -> bool {
        self.count <= self.cells.len()
    }

    /// All cells, when every one of them must be a mine.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// All cells, when none of them can be a mine.
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Remove a cell known to be a mine, accounting for it in the count.
    ///
    /// The count saturates at zero; callers that need to detect a mine in a
    /// zero-count sentence check [`Sentence::contains`] first.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            self.count = self.count.saturating_sub(1);
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Remove a cell known to be safe.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Whether every cell of `self` also appears in `other`.
    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Subtract a subset sentence: `self.cells - subset.cells` holds
    /// `self.count - subset.count` mines.
    ///
    /// Returns `None` when the counts would go negative, which can only
    /// happen if the knowledge is contradictory.
    pub fn difference(&self, subset: &Sentence) -> Option<Sentence> {
        let count = self.count.checked_sub(subset.count)?;
        Some(Sentence {
            cells: self.cells.difference(&subset.cells).copied().collect(),
            count,
        })
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
