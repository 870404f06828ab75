//! Play pipeline abstractions
//!
//! This module provides:
//! - A pipeline that plays many seeded games against random boards
//! - Observers for progress, metrics, traces and JSONL export

pub mod observers;
pub mod session;

pub use observers::{GameRecord, JsonlObserver, MetricsObserver, ProgressObserver, TraceObserver};
pub use session::{PlayConfig, PlayPipeline, PlayResult};

pub use crate::ports::Observer;
