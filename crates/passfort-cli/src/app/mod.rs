//! Application-level utilities for the PassFort CLI.
//!
//! This module provides:
//! - Path resolution for config and vault files
//! - A per-invocation context with lazily-loaded config

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
