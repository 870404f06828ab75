//! Adapters implementing domain ports.

pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::ports::KnowledgeRepository;

/// Pick a repository by file extension: `.msgpack`/`.mpk` use MessagePack,
/// everything else JSON.
pub fn repository_for_path(path: &Path) -> Box<dyn KnowledgeRepository> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("msgpack" | "mpk") => Box::new(MsgPackRepository::new()),
        _ => Box::new(JsonRepository::new()),
    }
}
