//! Ordered selector → rule group store.

use std::sync::Arc;

use crate::types::{ModeSelector, RuleGroup};

/// Registered rule groups in registration order.
///
/// Holds at most one entry per selector. Re-registering a selector drops the
/// old entry and appends the new one, so it counts as the most recent.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<(ModeSelector, Arc<RuleGroup>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is stored for `selector` with `group`.
    ///
    /// Returns the previous group, if there was one.
    pub(crate) fn replace(
        &mut self,
        selector: ModeSelector,
        group: RuleGroup,
    ) -> Option<Arc<RuleGroup>> {
        let previous = self
            .entries
            .iter()
            .position(|(existing, _)| *existing == selector)
            .map(|index| self.entries.remove(index).1);

        self.entries.push((selector, Arc::new(group)));
        previous
    }

    pub fn get(&self, selector: &ModeSelector) -> Option<&Arc<RuleGroup>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == selector)
            .map(|(_, group)| group)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModeSelector, &Arc<RuleGroup>)> {
        self.entries.iter().map(|(selector, group)| (selector, group))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
