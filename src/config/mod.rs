//! Launcher configuration: which engine to run.

mod loader;
mod types;

pub use loader::{ConfigError, CONFIG_ENV, ENGINE_ENV};
pub use types::{Config, EngineConfig};
