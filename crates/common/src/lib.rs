//! Ballbot Common Utilities
//!
//! Shared infrastructure for all Ballbot crates:
//! - Error types and result aliases
//! - Clock capability used to timestamp observations
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
