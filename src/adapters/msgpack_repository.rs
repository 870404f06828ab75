//! MessagePack implementation of the knowledge repository.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, minesweeper::KnowledgeBase, ports::KnowledgeRepository};

/// MessagePack-based knowledge repository.
///
/// # Examples
///
/// ```no_run
/// use minesweeper_ai::adapters::MsgPackRepository;
/// use minesweeper_ai::minesweeper::KnowledgeBase;
/// use minesweeper_ai::ports::KnowledgeRepository;
/// use minesweeper_ai::types::BoardSize;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let knowledge = KnowledgeBase::new(BoardSize::new(8, 8)?);
///
/// repo.save(&knowledge, Path::new("knowledge.msgpack"))?;
/// let loaded = repo.load(Path::new("knowledge.msgpack"))?;
/// # Ok::<(), minesweeper_ai::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeRepository for MsgPackRepository {
    fn save(&self, knowledge: &KnowledgeBase, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write_named(&mut file, knowledge).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize knowledge base to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<KnowledgeBase> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize knowledge base from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
