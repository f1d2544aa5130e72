//! Ligature rule compiler and per-mode dispatch table generator.
//!
//! This crate provides:
//! - Compilation of literal and pattern ligature declarations into
//!   per-leading-character matching patterns
//! - An ordered registry of rule groups keyed by mode selector
//! - Resolution of the applicable rule groups for an active mode through a
//!   host-supplied mode hierarchy, with per-mode caching
//! - Lowering of structured pattern expressions to regex source text
//!
//! # Architecture
//!
//! `LigatureTables` owns the registry and the table cache:
//! 1. `register` compiles specs into a `RuleGroup`, replaces the entry for
//!    that selector and clears every cached table
//! 2. `generate` folds the registry in registration order for a mode and
//!    caches the resulting `GeneratedTable`
//!
//! The shaping engine reads a `GeneratedTable` per character: when it meets a
//! leading character it tries that character's pattern against the text
//! that follows.

pub mod compiler;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod pattern;
pub mod registry;
pub mod tables;
pub mod types;

// Re-export main types for convenience
pub use error::LigatureError;
pub use hierarchy::{FlatModes, ModeHierarchy, ModeTree};
pub use pattern::{ExpansionError, PatternExpander, PatternExpr, RegexExpander};
pub use registry::Registry;
pub use tables::LigatureTables;
pub use types::{
    CompiledPattern, GeneratedTable, LigatureSpec, ModeId, ModeSelector, PatternSource, RuleGroup,
};
