//! Configuration system for par-ligature.
//!
//! This crate provides configuration loading, saving, and default values
//! for ligature rules. It includes:
//!
//! - Ligature set declarations (literals, raw regexes, pattern expressions)
//! - Mode selectors (one mode, a list of modes, or every mode)
//! - Mode hierarchy declarations
//! - Ignored modes and dispatch matcher tuning

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{
    LigatureEntryConfig, LigatureSetConfig, ModeDeclaration, ModesConfig, UNIVERSAL_MODE,
};
