//! JSON implementation of the knowledge repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, minesweeper::KnowledgeBase, ports::KnowledgeRepository};

/// Human-readable knowledge repository using pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeRepository for JsonRepository {
    fn save(&self, knowledge: &KnowledgeBase, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), knowledge)?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<KnowledgeBase> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
