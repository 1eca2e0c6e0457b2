//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/codegrade/config.toml)
//! 3. Project config (.codegrade/config.toml under the analysis root)
//! 4. Environment variables (CODEGRADE_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
