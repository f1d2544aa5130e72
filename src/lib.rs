//! par-ligature: configurable per-mode ligature dispatch tables.
//!
//! The workspace is split into:
//! - `par-ligature-rules` — rule compiler and per-mode table generator
//! - `par-ligature-config` — YAML configuration for ligature sets and modes
//! - this crate — config-driven runtime, dispatch-side matching, logging
//!   bridge and the inspection CLI

pub mod cli;
pub mod debug;
pub mod dispatch;
pub mod runtime;

pub use dispatch::{LigatureMatcher, LigatureSpan, RegexCache};
pub use runtime::{LigatureRuntime, RegistrationFailure};

// Re-export workspace crates so consumers need a single dependency
pub use par_ligature_config as config;
pub use par_ligature_rules as rules;
