//! Knowledge base that turns board observations into safe and mine cells
//!
//! Every observation adds one [`Sentence`] and then runs inference to a
//! fixpoint with two rules:
//!
//! - **Exact count**: a sentence whose count is 0 makes all its cells safe;
//!   one whose count equals its size makes all its cells mines.
//! - **Subset difference**: if `A.cells ⊆ B.cells`, then `B.cells - A.cells`
//!   holds exactly `B.count - A.count` mines.
//!
//! Nothing probabilistic happens here. When no exact deduction is left the
//! caller falls back to [`KnowledgeBase::make_random_move`].

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sentence::Sentence;
use crate::{
    Error, Result,
    types::{BoardSize, Cell},
};

/// What a single call to [`KnowledgeBase::add_knowledge`] deduced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceReport {
    /// Inference passes run, including the final pass that changed nothing
    pub passes: usize,
    /// Cells proven safe during this call, in the order they were proven.
    /// The observed cell of [`KnowledgeBase::add_knowledge`] is not listed.
    pub new_safes: Vec<Cell>,
    /// Cells proven to be mines during this call, in the order they were proven
    pub new_mines: Vec<Cell>,
    /// Sentences added by the subset-difference rule
    pub sentences_inferred: usize,
}

impl InferenceReport {
    /// Whether the call proved any cell or inferred any sentence.
    pub fn is_productive(&self) -> bool {
        !self.new_safes.is_empty() || !self.new_mines.is_empty() || self.sentences_inferred > 0
    }
}

/// Minesweeper player knowledge for a single game.
///
/// # Examples
///
/// ```
/// use minesweeper_ai::{minesweeper::KnowledgeBase, types::{BoardSize, Cell}};
///
/// let mut kb = KnowledgeBase::new(BoardSize::new(3, 3)?);
/// kb.add_knowledge(Cell::new(0, 0), 0)?;
///
/// assert!(kb.safes().contains(&Cell::new(1, 1)));
/// assert_eq!(kb.make_safe_move(), Some(Cell::new(0, 1)));
/// # Ok::<(), minesweeper_ai::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KnowledgeSnapshot")]
pub struct KnowledgeBase {
    size: BoardSize,
    moves_made: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    knowledge: Vec<Sentence>,
    max_passes: Option<usize>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a board.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            moves_made: BTreeSet::new(),
            safes: BTreeSet::new(),
            mines: BTreeSet::new(),
            knowledge: Vec::new(),
            max_passes: None,
        }
    }

    /// Fail [`KnowledgeBase::add_knowledge`] with [`Error::PassLimitExceeded`]
    /// instead of running more than `limit` inference passes.
    pub fn with_max_passes(mut self, limit: usize) -> Self {
        self.max_passes = Some(limit);
        self
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Live sentences that have not been resolved yet.
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Mark a cell as a mine and remove it from every live sentence.
    ///
    /// # Errors
    ///
    /// - [`Error::CellOutOfBounds`] if the cell is not on the board
    /// - [`Error::ConflictingMark`] if the cell is already known to be safe
    /// - [`Error::Contradiction`] if a live sentence already says its cells are all safe
    pub fn mark_mine(&mut self, cell: Cell) -> Result<()> {
        self.size.check(cell)?;
        if self.safes.contains(&cell) {
            return Err(Error::ConflictingMark { cell });
        }
        if let Some(sentence) = self
            .knowledge
            .iter()
            .find(|sentence| sentence.count() == 0 && sentence.contains(cell))
        {
            return Err(Error::Contradiction {
                sentence: format!("{sentence} cannot contain mine {cell}"),
            });
        }

        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
        Ok(())
    }

    /// Mark a cell as safe and remove it from every live sentence.
    ///
    /// # Errors
    ///
    /// - [`Error::CellOutOfBounds`] if the cell is not on the board
    /// - [`Error::ConflictingMark`] if the cell is already known to be a mine
    pub fn mark_safe(&mut self, cell: Cell) -> Result<()> {
        self.size.check(cell)?;
        if self.mines.contains(&cell) {
            return Err(Error::ConflictingMark { cell });
        }

        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
        Ok(())
    }

    /// Record that `cell` was revealed safely with `count` mines among its
    /// neighbors, then deduce everything that follows.
    ///
    /// # Errors
    ///
    /// - [`Error::CellOutOfBounds`] if the cell is not on the board
    /// - [`Error::InvalidMineCount`] if `count` exceeds the number of neighbors
    /// - [`Error::ConflictingMark`] if the cell is already known to be a mine
    /// - [`Error::Contradiction`] if the observation disagrees with what is known
    /// - [`Error::PassLimitExceeded`] if a pass limit is set and inference exceeds it
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> Result<InferenceReport> {
        self.size.check(cell)?;
        let neighbors: Vec<Cell> = self.size.neighbors(cell).collect();
        if count > neighbors.len() {
            return Err(Error::InvalidMineCount {
                cell,
                count,
                neighbors: neighbors.len(),
            });
        }

        self.mark_safe(cell)?;
        self.moves_made.insert(cell);

        let mut report = InferenceReport::default();

        self.assert_constraint(neighbors, count, &mut report)?;
        Ok(report)
    }

    /// Add a constraint directly, then deduce everything that follows.
    ///
    /// Cells already known to be safe or mines are folded out of the
    /// sentence first, as for observations.
    ///
    /// # Errors
    ///
    /// - [`Error::CellOutOfBounds`] if a cell is not on the board
    /// - [`Error::Contradiction`] if the sentence disagrees with what is known
    /// - [`Error::PassLimitExceeded`] if a pass limit is set and inference exceeds it
    pub fn add_sentence(&mut self, sentence: Sentence) -> Result<InferenceReport> {
        for &cell in sentence.cells() {
            self.size.check(cell)?;
        }
        let mut report = InferenceReport::default();
        let count = sentence.count();
        self.assert_constraint(sentence.cells().iter().copied(), count, &mut report)?;
        Ok(report)
    }

    /// Fold known cells out of "`count` mines among `cells`", store the
    /// result unless it is already live, and run inference.
    fn assert_constraint(
        &mut self,
        cells: impl IntoIterator<Item = Cell>,
        count: usize,
        report: &mut InferenceReport,
    ) -> Result<()> {
        let mut undetermined = BTreeSet::new();
        let mut remaining = count;
        for cell in cells {
            if self.safes.contains(&cell) {
                continue;
            }
            if self.mines.contains(&cell) {
                remaining = remaining.checked_sub(1).ok_or_else(|| Error::Contradiction {
                    sentence: format!("{count} mines among cells holding more known mines"),
                })?;
                continue;
            }
            undetermined.insert(cell);
        }

        let sentence = Sentence::new(undetermined, remaining);
        if !sentence.is_consistent() {
            return Err(Error::Contradiction {
                sentence: sentence.to_string(),
            });
        }
        if !sentence.is_empty() && !self.knowledge.contains(&sentence) {
            self.knowledge.push(sentence);
        }

        self.infer(report)
    }

    /// Run inference passes until one of them changes nothing.
    fn infer(&mut self, report: &mut InferenceReport) -> Result<()> {
        loop {
            if let Some(limit) = self.max_passes {
                if report.passes >= limit {
                    return Err(Error::PassLimitExceeded { limit });
                }
            }
            report.passes += 1;

            let mut changed = self.resolve_known(report)?;
            let derived = self.derive_subset_differences()?;
            if !derived.is_empty() {
                changed = true;
                report.sentences_inferred += derived.len();
                self.knowledge.extend(derived);
            }

            if !changed {
                return Ok(());
            }
        }
    }

    /// Drop vacuous and duplicate sentences and turn exact-count sentences
    /// into marks.
    ///
    /// Returns whether any sentence was removed.
    fn resolve_known(&mut self, report: &mut InferenceReport) -> Result<bool> {
        let before = self.knowledge.len();
        let mut live = Vec::with_capacity(before);
        let mut safes = BTreeSet::new();
        let mut mines = BTreeSet::new();

        for sentence in std::mem::take(&mut self.knowledge) {
            if sentence.is_empty() || live.contains(&sentence) {
                continue;
            }
            if !sentence.is_consistent() {
                return Err(Error::Contradiction {
                    sentence: sentence.to_string(),
                });
            }

            let known_safes = sentence.known_safes();
            let known_mines = sentence.known_mines();
            if known_safes.is_empty() && known_mines.is_empty() {
                live.push(sentence);
            } else {
                safes.extend(known_safes);
                mines.extend(known_mines);
            }
        }
        self.knowledge = live;

        for cell in safes {
            if !self.safes.contains(&cell) {
                self.mark_safe(cell)?;
                report.new_safes.push(cell);
            }
        }
        for cell in mines {
            if !self.mines.contains(&cell) {
                self.mark_mine(cell)?;
                report.new_mines.push(cell);
            }
        }

        Ok(self.knowledge.len() != before)
    }

    /// New sentences from every live pair where one is a subset of the other.
    fn derive_subset_differences(&self) -> Result<Vec<Sentence>> {
        let existing: HashSet<&Sentence> = self.knowledge.iter().collect();
        let mut fresh = HashSet::new();
        let mut derived = Vec::new();

        for (i, a) in self.knowledge.iter().enumerate() {
            for b in &self.knowledge[i + 1..] {
                if a == b {
                    continue;
                }
                let (small, big) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                if !small.is_subset(big) {
                    continue;
                }

                let candidate = big.difference(small).ok_or_else(|| Error::Contradiction {
                    sentence: format!("{small} is a subset of {big} but holds more mines"),
                })?;
                if !candidate.is_consistent() {
                    return Err(Error::Contradiction {
                        sentence: format!("{big} minus {small} leaves {candidate}"),
                    });
                }
                if candidate.is_empty() || existing.contains(&candidate) {
                    continue;
                }
                if fresh.insert(candidate.clone()) {
                    derived.push(candidate);
                }
            }
        }

        Ok(derived)
    }

    /// Check the invariants that every operation preserves.
    ///
    /// Deserialized knowledge bases are checked with this before use.
    ///
    /// # Errors
    ///
    /// - [`Error::CellOutOfBounds`] if any recorded cell is off the board
    /// - [`Error::ConflictingMark`] if a cell is both safe and a mine
    /// - [`Error::InvalidConfiguration`] if a played cell is not known safe,
    ///   or a live sentence still holds a resolved cell
    /// - [`Error::Contradiction`] if a live sentence has more mines than cells
    pub fn validate(&self) -> Result<()> {
        let sentence_cells = self.knowledge.iter().flat_map(|sentence| sentence.cells());
        for &cell in self
            .moves_made
            .iter()
            .chain(&self.safes)
            .chain(&self.mines)
            .chain(sentence_cells)
        {
            self.size.check(cell)?;
        }

        if let Some(&cell) = self.safes.intersection(&self.mines).next() {
            return Err(Error::ConflictingMark { cell });
        }
        if let Some(cell) = self.moves_made.difference(&self.safes).next() {
            return Err(Error::InvalidConfiguration {
                message: format!("played cell {cell} is not known to be safe"),
            });
        }

        for sentence in &self.knowledge {
            if !sentence.is_consistent() {
                return Err(Error::Contradiction {
                    sentence: sentence.to_string(),
                });
            }
            if let Some(cell) = sentence
                .cells()
                .iter()
                .find(|&&cell| self.safes.contains(&cell) || self.mines.contains(&cell))
            {
                return Err(Error::InvalidConfiguration {
                    message: format!("sentence {sentence} holds resolved cell {cell}"),
                });
            }
        }
        Ok(())
    }

    /// A cell known to be safe that has not been played yet.
    ///
    /// Returns the first such cell in row-major order, or `None`.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    /// A cell that has not been played and is not a known mine.
    ///
    /// Scans the whole board once in row-major order, wrapping around, from a
    /// random starting cell. Returns `None` when no such cell remains.
    pub fn make_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let total = self.size.cell_count();
        let start = rng.random_range(0..total);
        (0..total)
            .map(|offset| self.size.cell_at((start + offset) % total))
            .find(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
    }
}

/// Serialized form of a [`KnowledgeBase`], validated on the way in.
#[derive(Deserialize)]
struct KnowledgeSnapshot {
    size: BoardSize,
    moves_made: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    knowledge: Vec<Sentence>,
    #[serde(default)]
    max_passes: Option<usize>,
}

impl TryFrom<KnowledgeSnapshot> for KnowledgeBase {
    type Error = Error;

    fn try_from(snapshot: KnowledgeSnapshot) -> Result<Self> {
        let knowledge = Self {
            size: snapshot.size,
            moves_made: snapshot.moves_made,
            safes: snapshot.safes,
            mines: snapshot.mines,
            knowledge: snapshot.knowledge,
            max_passes: snapshot.max_passes,
        };
        knowledge.validate()?;
        Ok(knowledge)
    }
}
