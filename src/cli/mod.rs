//! CLI-specific functionality for promptx
//!
//! This module contains all CLI-related code including argument parsing,
//! prompt input handling, and configuration discovery.

pub mod args;
pub mod config;

pub use args::{Args, Commands, resolve_prompt};
pub use config::ConfigDiscovery;
