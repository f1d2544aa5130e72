//! Data model shared by the rule compiler and the table generator.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hierarchy::ModeHierarchy;
use crate::pattern::PatternExpr;

// ============================================================================
// Modes
// ============================================================================

/// Identifier of an editing mode (e.g. `prog`, `rust`, `markdown`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModeId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ModeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which editing mode(s) a rule group applies to.
///
/// Registry replacement compares selectors structurally: `Set([a, b])` and
/// `Set([b, a])` are different slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModeSelector {
    /// Applies to every mode
    Universal,
    /// Applies to one mode and its descendants
    Single(ModeId),
    /// Applies to each listed mode and their descendants
    Set(Vec<ModeId>),
}

impl ModeSelector {
    /// Convenience constructor for [`ModeSelector::Single`].
    pub fn single(mode: impl Into<ModeId>) -> Self {
        Self::Single(mode.into())
    }

    /// Convenience constructor for [`ModeSelector::Set`].
    pub fn set<I, M>(modes: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ModeId>,
    {
        Self::Set(modes.into_iter().map(Into::into).collect())
    }

    /// Whether rules registered under this selector apply to `mode`.
    ///
    /// A listed mode matches when it equals `mode` or is one of its ancestors.
    pub fn applies_to(&self, mode: &ModeId, hierarchy: &dyn ModeHierarchy) -> bool {
        let matches = |target: &ModeId| target == mode || hierarchy.is_descendant(mode, target);
        match self {
            ModeSelector::Universal => true,
            ModeSelector::Single(target) => matches(target),
            ModeSelector::Set(targets) => targets.iter().any(matches),
        }
    }
}

impl fmt::Display for ModeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeSelector::Universal => f.write_str("*"),
            ModeSelector::Single(mode) => write!(f, "{mode}"),
            ModeSelector::Set(modes) => {
                let names: Vec<&str> = modes.iter().map(ModeId::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

// ============================================================================
// Ligature specifications
// ============================================================================

/// Pattern text attached to a [`LigatureSpec::Pattern`].
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSource {
    /// Already a regex source string; passed through untouched
    Regex(String),
    /// Expression lowered to a regex source by the injected expander
    Expr(PatternExpr),
}

/// A single ligature declaration handed to the rule compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum LigatureSpec {
    /// A literal character sequence such as `"=>"`; must be at least 2 chars
    Literal(String),
    /// A leading character plus a pattern matched against what follows it
    Pattern(char, PatternSource),
}

impl LigatureSpec {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn regex(leading: char, source: impl Into<String>) -> Self {
        Self::Pattern(leading, PatternSource::Regex(source.into()))
    }

    pub fn expr(leading: char, expr: PatternExpr) -> Self {
        Self::Pattern(leading, PatternSource::Expr(expr))
    }
}

// ============================================================================
// Compiled output
// ============================================================================

/// Matching pattern for everything that may follow one leading character.
///
/// Regex alternatives are tried before literal ones: regex ligatures are
/// expected to be supersets of the literal ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPattern {
    /// Regex-derived fragments, in registration order
    pub regex_alternatives: Vec<String>,
    /// Literal tails (text after the leading char), in registration order
    pub literal_alternatives: Vec<String>,
}

impl CompiledPattern {
    pub fn has_regex_group(&self) -> bool {
        !self.regex_alternatives.is_empty()
    }

    pub fn has_literal_group(&self) -> bool {
        !self.literal_alternatives.is_empty()
    }

    /// Render as a `regex`-crate source string.
    ///
    /// Literal tails are escaped and emitted longest first so that a
    /// leftmost-first engine picks the longest literal ligature. Empty
    /// groups are left out entirely.
    pub fn render(&self) -> String {
        let mut groups = Vec::with_capacity(2);

        if self.has_regex_group() {
            groups.push(format!("(?:{})", self.regex_alternatives.join("|")));
        }

        if self.has_literal_group() {
            let mut literals: Vec<&str> =
                self.literal_alternatives.iter().map(String::as_str).collect();
            // Stable sort keeps registration order among equal lengths
            literals.sort_by_key(|tail| std::cmp::Reverse(tail.chars().count()));
            let escaped: Vec<String> = literals.into_iter().map(regex::escape).collect();
            groups.push(format!("(?:{})", escaped.join("|")));
        }

        format!("(?:{})", groups.join("|"))
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Leading character → pattern mapping registered for one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleGroup {
    patterns: BTreeMap<char, Arc<CompiledPattern>>,
}

impl RuleGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, leading: char) -> Option<&Arc<CompiledPattern>> {
        self.patterns.get(&leading)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Arc<CompiledPattern>)> {
        self.patterns.iter().map(|(c, p)| (*c, p))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<(char, CompiledPattern)> for RuleGroup {
    fn from_iter<T: IntoIterator<Item = (char, CompiledPattern)>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().map(|(c, p)| (c, Arc::new(p))).collect(),
        }
    }
}

/// Resolved dispatch table for one concrete mode.
///
/// Immutable once built; the generator hands out shared `Arc`s of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    mode: ModeId,
    entries: BTreeMap<char, Arc<CompiledPattern>>,
}

impl GeneratedTable {
    pub(crate) fn new(mode: ModeId, entries: BTreeMap<char, Arc<CompiledPattern>>) -> Self {
        Self { mode, entries }
    }

    /// The mode this table was resolved for.
    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    pub fn get(&self, leading: char) -> Option<&Arc<CompiledPattern>> {
        self.entries.get(&leading)
    }

    pub fn contains(&self, leading: char) -> bool {
        self.entries.contains_key(&leading)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Arc<CompiledPattern>)> {
        self.entries.iter().map(|(c, p)| (*c, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
