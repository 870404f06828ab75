//! Repository port for knowledge base persistence.
//!
//! A saved knowledge base lets a session be inspected or resumed later, for
//! example by `minesweeper solve --knowledge`.

use std::path::Path;

use crate::{Result, minesweeper::KnowledgeBase};

/// Port for persisting and loading knowledge bases.
///
/// # Examples
///
/// ```no_run
/// use minesweeper_ai::ports::KnowledgeRepository;
/// use minesweeper_ai::minesweeper::KnowledgeBase;
/// use std::path::Path;
///
/// fn save_knowledge<R: KnowledgeRepository>(
///     repo: &R,
///     knowledge: &KnowledgeBase,
///     path: &Path,
/// ) -> minesweeper_ai::Result<()> {
///     repo.save(knowledge, path)
/// }
/// ```
pub trait KnowledgeRepository {
    /// Save a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails.
    fn save(&self, knowledge: &KnowledgeBase, path: &Path) -> Result<()>;

    /// Load a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    fn load(&self, path: &Path) -> Result<KnowledgeBase>;
}
