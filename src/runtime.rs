//! Ligature runtime built from configuration.
//!
//! Registers every configured ligature set into a [`LigatureTables`] wired
//! to the configured mode hierarchy, and hands out dispatch tables and
//! matchers per mode.

use std::collections::HashSet;
use std::sync::Arc;

use par_ligature_config::Config;
use par_ligature_rules::{
    GeneratedTable, LigatureError, LigatureSpec, LigatureTables, ModeId, ModeSelector,
    RegexExpander,
};

use crate::dispatch::{LigatureMatcher, RegexCache};

/// A ligature set from the config that failed to register.
#[derive(Debug, Clone)]
pub struct RegistrationFailure {
    /// Position of the set in `ligature_sets`
    pub index: usize,
    pub selector: ModeSelector,
    pub error: LigatureError,
}

/// Config-driven owner of the rule tables.
#[derive(Debug)]
pub struct LigatureRuntime {
    tables: LigatureTables,
    ignored_modes: HashSet<ModeId>,
    regex_cache: RegexCache,
    failures: Vec<RegistrationFailure>,
}

impl LigatureRuntime {
    /// Build a runtime from config.
    ///
    /// Ligature sets that fail to register are logged and skipped; they are
    /// reported by [`failures`](Self::failures).
    pub fn from_config(config: &Config) -> Self {
        let tables = LigatureTables::new()
            .with_hierarchy(config.mode_tree())
            .with_expander(RegexExpander);

        let mut runtime = Self {
            tables,
            ignored_modes: config
                .ignored_modes
                .iter()
                .map(|m| ModeId::from(m.as_str()))
                .collect(),
            regex_cache: RegexCache::new(config.regex_cache_size),
            failures: Vec::new(),
        };

        log::info!(
            "Building ligature runtime from {} config ligature sets",
            config.ligature_sets.len()
        );
        for (index, set) in config.ligature_sets.iter().enumerate() {
            let selector = set.selector();
            match runtime.tables.register(selector.clone(), &set.specs()) {
                Ok(()) => {
                    log::debug!(
                        "Registered ligature set #{} for {} ({} ligatures)",
                        index,
                        selector,
                        set.ligatures.len()
                    );
                }
                Err(error) => {
                    log::warn!(
                        "Invalid ligature set #{} for {}: {}",
                        index,
                        selector,
                        error
                    );
                    runtime.failures.push(RegistrationFailure {
                        index,
                        selector,
                        error,
                    });
                }
            }
        }

        log::info!(
            "Ligature runtime initialized with {} rule groups",
            runtime.tables.registry().len()
        );
        runtime
    }

    /// Register (or replace) a rule group at runtime.
    pub fn register(
        &mut self,
        selector: ModeSelector,
        specs: &[LigatureSpec],
    ) -> Result<(), LigatureError> {
        self.tables.register(selector, specs)
    }

    pub fn is_ignored(&self, mode: &ModeId) -> bool {
        self.ignored_modes.contains(mode)
    }

    /// Dispatch table for `mode`, or `None` when the mode is ignored.
    pub fn table_for(&mut self, mode: &ModeId) -> Option<Arc<GeneratedTable>> {
        if self.is_ignored(mode) {
            log::debug!("Mode '{}' is ignored, no ligature table", mode);
            return None;
        }
        Some(self.tables.generate(mode))
    }

    /// Compiled matcher for `mode`, or `None` when the mode is ignored.
    pub fn matcher_for(&mut self, mode: &ModeId) -> Option<LigatureMatcher> {
        let table = self.table_for(mode)?;
        Some(LigatureMatcher::new(table, &mut self.regex_cache))
    }

    pub fn failures(&self) -> &[RegistrationFailure] {
        &self.failures
    }

    pub fn tables(&self) -> &LigatureTables {
        &self.tables
    }
}
