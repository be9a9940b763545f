//! Petmail Core: shared error type, extraction options and strategy vocabulary.

pub mod config;
pub mod error;
pub mod strategy;

pub use config::ExtractOptions;
pub use error::{Error, Result};
pub use strategy::StrategyId;
