//! The rule service: owns the registry, the table cache and the injected
//! collaborators, and exposes the only two operations that touch them.

use std::sync::Arc;

use crate::compiler::compile_rules;
use crate::error::LigatureError;
use crate::generator::TableCache;
use crate::hierarchy::{FlatModes, ModeHierarchy};
use crate::pattern::{PatternExpander, RegexExpander};
use crate::registry::Registry;
use crate::types::{GeneratedTable, LigatureSpec, ModeId, ModeSelector};

/// Ligature rule registry with a per-mode dispatch table cache.
///
/// ```ignore
/// let mut tree = ModeTree::new();
/// tree.declare("rust", "prog");
///
/// let mut tables = LigatureTables::new().with_hierarchy(tree);
/// tables.register(
///     ModeSelector::single("prog"),
///     &[LigatureSpec::literal("=>"), LigatureSpec::literal("==")],
/// )?;
///
/// let table = tables.generate(&ModeId::from("rust"));
/// assert!(table.contains('='));
/// ```
pub struct LigatureTables {
    registry: Registry,
    cache: TableCache,
    hierarchy: Box<dyn ModeHierarchy>,
    expander: Box<dyn PatternExpander>,
}

impl std::fmt::Debug for LigatureTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LigatureTables")
            .field("registry", &self.registry)
            .field("cached_modes", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl LigatureTables {
    /// Create an empty service with no mode relationships and the default
    /// regex expander.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            cache: TableCache::new(),
            hierarchy: Box::new(FlatModes),
            expander: Box::new(RegexExpander),
        }
    }

    /// Use `hierarchy` to decide which selectors apply to a mode.
    ///
    /// Drops any cached tables since they were resolved against the old one.
    pub fn with_hierarchy(mut self, hierarchy: impl ModeHierarchy + 'static) -> Self {
        self.hierarchy = Box::new(hierarchy);
        self.cache.invalidate();
        self
    }

    /// Use `expander` to lower pattern expressions at registration time.
    pub fn with_expander(mut self, expander: impl PatternExpander + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Compile `specs` and store them for `selector`, fully replacing what
    /// was registered for that exact selector before.
    ///
    /// Every cached table is discarded on success. On error neither the
    /// registry nor the cache is touched.
    pub fn register(
        &mut self,
        selector: ModeSelector,
        specs: &[LigatureSpec],
    ) -> Result<(), LigatureError> {
        let group = compile_rules(specs, self.expander.as_ref())?;

        log::debug!(
            "Registering {} ligature leading characters for selector {}",
            group.len(),
            selector
        );
        if self.registry.replace(selector, group).is_some() {
            log::debug!("Replaced previously registered ligature rules");
        }
        self.cache.invalidate();
        Ok(())
    }

    /// Dispatch table for `mode`, built on first request and cached until
    /// the next successful [`register`](Self::register).
    pub fn generate(&mut self, mode: &ModeId) -> Arc<GeneratedTable> {
        self.cache
            .generate(mode, &self.registry, self.hierarchy.as_ref())
    }

    /// Read-only view of the registered rule groups.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_cached(&self, mode: &ModeId) -> bool {
        self.cache.contains(mode)
    }

    pub fn cached_mode_count(&self) -> usize {
        self.cache.len()
    }
}

impl Default for LigatureTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::ModeTree;

    #[test]
    fn test_register_invalidates_cache() {
        let mut tables = LigatureTables::new();
        let mode = ModeId::from("text");
        tables
            .register(ModeSelector::Universal, &[LigatureSpec::literal("=>")])
            .unwrap();
        tables.generate(&mode);
        assert!(tables.is_cached(&mode));

        tables
            .register(ModeSelector::single("other"), &[])
            .unwrap();
        assert!(!tables.is_cached(&mode));
        assert_eq!(tables.cached_mode_count(), 0);
    }

    #[test]
    fn test_failed_register_keeps_cache_and_registry() {
        let mut tables = LigatureTables::new();
        let mode = ModeId::from("text");
        tables
            .register(ModeSelector::Universal, &[LigatureSpec::literal("=>")])
            .unwrap();
        let before = tables.generate(&mode);

        let result = tables.register(
            ModeSelector::Universal,
            &[LigatureSpec::literal("<="), LigatureSpec::literal("<")],
        );
        assert!(result.is_err());
        assert!(tables.is_cached(&mode));
        assert!(Arc::ptr_eq(&before, &tables.generate(&mode)));
        assert_eq!(tables.registry().len(), 1);
    }

    #[test]
    fn test_with_hierarchy_resolves_ancestors() {
        let mut tree = ModeTree::new();
        tree.declare("rust", "prog");
        let mut tables = LigatureTables::new().with_hierarchy(tree);
        tables
            .register(ModeSelector::single("prog"), &[LigatureSpec::literal("::")])
            .unwrap();

        assert!(tables.generate(&ModeId::from("rust")).contains(':'));
        assert!(!tables.generate(&ModeId::from("text")).contains(':'));
    }
}
