//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters: observers
//! receive game events, repositories persist knowledge bases.

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::KnowledgeRepository;
