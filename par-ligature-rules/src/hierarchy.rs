//! Mode-hierarchy predicate.
//!
//! The host decides which modes refine which; the rule tables only ask
//! "is `mode` a descendant of `ancestor`?".

use std::collections::{HashMap, HashSet};

use crate::types::ModeId;

/// Ancestry relation between editing modes, supplied by the host.
pub trait ModeHierarchy {
    /// True when `mode` strictly descends from `ancestor`.
    fn is_descendant(&self, mode: &ModeId, ancestor: &ModeId) -> bool;
}

impl<F> ModeHierarchy for F
where
    F: Fn(&ModeId, &ModeId) -> bool,
{
    fn is_descendant(&self, mode: &ModeId, ancestor: &ModeId) -> bool {
        self(mode, ancestor)
    }
}

/// A hierarchy with no relationships: only exact selector matches apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatModes;

impl ModeHierarchy for FlatModes {
    fn is_descendant(&self, _mode: &ModeId, _ancestor: &ModeId) -> bool {
        false
    }
}

/// Single-parent mode tree (`rust` → `prog` → `fundamental`).
#[derive(Debug, Clone, Default)]
pub struct ModeTree {
    parents: HashMap<ModeId, ModeId>,
}

impl ModeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `parent` as the direct parent of `mode`, replacing any earlier parent.
    pub fn declare(&mut self, mode: impl Into<ModeId>, parent: impl Into<ModeId>) {
        self.parents.insert(mode.into(), parent.into());
    }

    pub fn parent(&self, mode: &ModeId) -> Option<&ModeId> {
        self.parents.get(mode)
    }

    /// Ancestors of `mode`, nearest first. Stops at the first repeated mode.
    pub fn ancestors<'a>(&'a self, mode: &'a ModeId) -> Vec<&'a ModeId> {
        let mut seen: HashSet<&ModeId> = HashSet::from([mode]);
        let mut chain = Vec::new();
        let mut current = mode;
        while let Some(parent) = self.parents.get(current) {
            if !seen.insert(parent) {
                log::warn!("Mode hierarchy cycle detected at '{}'", parent);
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl ModeHierarchy for ModeTree {
    fn is_descendant(&self, mode: &ModeId, ancestor: &ModeId) -> bool {
        self.ancestors(mode).into_iter().any(|m| m == ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ModeTree {
        let mut tree = ModeTree::new();
        tree.declare("prog", "fundamental");
        tree.declare("c", "prog");
        tree.declare("cpp", "c");
        tree
    }

    #[test]
    fn test_direct_and_transitive_descendants() {
        let tree = tree();
        assert!(tree.is_descendant(&"c".into(), &"prog".into()));
        assert!(tree.is_descendant(&"cpp".into(), &"prog".into()));
        assert!(tree.is_descendant(&"cpp".into(), &"fundamental".into()));
    }

    #[test]
    fn test_not_descendant_of_self_or_child() {
        let tree = tree();
        assert!(!tree.is_descendant(&"prog".into(), &"prog".into()));
        assert!(!tree.is_descendant(&"prog".into(), &"c".into()));
        assert!(!tree.is_descendant(&"text".into(), &"prog".into()));
    }

    #[test]
    fn test_ancestors_order() {
        let tree = tree();
        let cpp = ModeId::from("cpp");
        let names: Vec<&str> = tree.ancestors(&cpp).iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["c", "prog", "fundamental"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut tree = ModeTree::new();
        tree.declare("a", "b");
        tree.declare("b", "a");
        assert!(tree.is_descendant(&"a".into(), &"b".into()));
        assert!(!tree.is_descendant(&"a".into(), &"z".into()));
    }

    #[test]
    fn test_closure_hierarchy() {
        let everything_is_prog = |_: &ModeId, ancestor: &ModeId| ancestor.as_str() == "prog";
        assert!(everything_is_prog.is_descendant(&"x".into(), &"prog".into()));
        assert!(!FlatModes.is_descendant(&"x".into(), &"prog".into()));
    }
}
