//! # JobPilot Config
//!
//! Configuration management for the JobPilot service.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
