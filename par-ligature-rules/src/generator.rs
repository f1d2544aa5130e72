//! Table generator: registry + active mode → cached dispatch table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::hierarchy::ModeHierarchy;
use crate::registry::Registry;
use crate::types::{GeneratedTable, ModeId};

/// Per-mode cache of generated tables.
///
/// Only ever cleared as a whole.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<ModeId, Arc<GeneratedTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `mode`, building it on a miss.
    pub fn generate(
        &mut self,
        mode: &ModeId,
        registry: &Registry,
        hierarchy: &dyn ModeHierarchy,
    ) -> Arc<GeneratedTable> {
        if let Some(cached) = self.tables.get(mode) {
            return Arc::clone(cached);
        }

        let table = Arc::new(build_table(mode, registry, hierarchy));
        log::debug!(
            "Generated ligature table for mode '{}' with {} leading characters",
            mode,
            table.len()
        );
        self.tables.insert(mode.clone(), Arc::clone(&table));
        table
    }

    pub fn contains(&self, mode: &ModeId) -> bool {
        self.tables.contains_key(mode)
    }

    pub fn invalidate(&mut self) {
        if !self.tables.is_empty() {
            log::debug!("Discarding {} cached ligature tables", self.tables.len());
        }
        self.tables.clear();
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Fold the registry in order; later applicable groups win per character.
fn build_table(mode: &ModeId, registry: &Registry, hierarchy: &dyn ModeHierarchy) -> GeneratedTable {
    let mut entries = BTreeMap::new();

    for (selector, group) in registry.iter() {
        if !selector.applies_to(mode, hierarchy) {
            continue;
        }
        log::trace!("Selector {} applies to mode '{}'", selector, mode);
        for (leading, pattern) in group.iter() {
            entries.insert(leading, Arc::clone(pattern));
        }
    }

    GeneratedTable::new(mode.clone(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::FlatModes;
    use crate::types::{CompiledPattern, ModeSelector, RuleGroup};

    fn group(c: char, tail: &str) -> RuleGroup {
        let pattern = CompiledPattern {
            regex_alternatives: vec![],
            literal_alternatives: vec![tail.to_string()],
        };
        [(c, pattern)].into_iter().collect()
    }

    #[test]
    fn test_cache_hit_returns_same_instance() {
        let mut registry = Registry::new();
        registry.replace(ModeSelector::Universal, group('=', ">"));
        let mut cache = TableCache::new();
        let mode = ModeId::from("text");

        let first = cache.generate(&mode, &registry, &FlatModes);
        let second = cache.generate(&mode, &registry, &FlatModes);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_later_entries_override_earlier() {
        let mut registry = Registry::new();
        registry.replace(ModeSelector::Universal, group('=', ">"));
        registry.replace(ModeSelector::single("text"), group('=', "="));
        let mut cache = TableCache::new();

        let table = cache.generate(&ModeId::from("text"), &registry, &FlatModes);
        assert_eq!(table.get('=').unwrap().literal_alternatives, vec!["="]);
    }

    #[test]
    fn test_invalidate_drops_everything() {
        let registry = Registry::new();
        let mut cache = TableCache::new();
        cache.generate(&ModeId::from("a"), &registry, &FlatModes);
        cache.generate(&ModeId::from("b"), &registry, &FlatModes);
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
        assert!(!cache.contains(&ModeId::from("a")));
    }

    #[test]
    fn test_empty_registry_gives_empty_table() {
        let mut cache = TableCache::new();
        let table = cache.generate(&ModeId::from("a"), &Registry::new(), &FlatModes);
        assert!(table.is_empty());
        assert_eq!(table.mode().as_str(), "a");
    }
}
