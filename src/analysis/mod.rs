//! Analysis of played games

pub mod stats;

pub use stats::{GameStats, ProportionInterval, clopper_pearson};
