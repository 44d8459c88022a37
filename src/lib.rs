//! Casino number guessing game.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod console;
pub mod types;
pub mod engine;
pub mod storage;
