//! CLI infrastructure for the minesweeper player
//!
//! This module provides the command-line interface for playing single
//! traced games, benchmarking over many boards, and solving recorded
//! observations.

pub mod commands;
pub mod config;
pub mod output;
