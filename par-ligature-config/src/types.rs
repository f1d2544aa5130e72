//! Ligature set, mode selector and mode declaration configuration types.

use par_ligature_rules::{LigatureSpec, ModeId, ModeSelector, PatternExpr};
use serde::{Deserialize, Serialize};

// ============================================================================
// Mode selection
// ============================================================================

/// Mode selector as written in YAML.
///
/// ```yaml
/// modes: prog            # one mode (and its descendants)
/// modes: [markdown, org] # several modes
/// modes: "*"             # every mode, same as leaving `modes` out
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModesConfig {
    One(String),
    Many(Vec<String>),
}

/// Mode name that selects every mode.
pub const UNIVERSAL_MODE: &str = "*";

impl ModesConfig {
    pub fn to_selector(&self) -> ModeSelector {
        match self {
            ModesConfig::One(mode) if mode == UNIVERSAL_MODE => ModeSelector::Universal,
            ModesConfig::One(mode) => ModeSelector::single(mode.as_str()),
            ModesConfig::Many(modes) => ModeSelector::set(modes.iter().map(String::as_str)),
        }
    }
}

// ============================================================================
// Ligature entries
// ============================================================================

/// One ligature as written in YAML.
///
/// ```yaml
/// ligatures:
///   - "=>"                                  # literal
///   - { char: "-", regex: "-+>" }           # raw regex following `-`
///   - char: "="
///     expr: { one_or_more: { chars: ["=", ">", "<"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LigatureEntryConfig {
    Literal(String),
    Regex {
        #[serde(rename = "char")]
        leading: char,
        regex: String,
    },
    Expr {
        #[serde(rename = "char")]
        leading: char,
        // Map form (`{ one_or_more: ... }`) instead of YAML tags so the
        // untagged enum can read back what it writes
        #[serde(with = "serde_yaml_ng::with::singleton_map_recursive")]
        expr: PatternExpr,
    },
}

impl LigatureEntryConfig {
    pub fn literal(text: &str) -> Self {
        Self::Literal(text.to_string())
    }

    pub fn to_spec(&self) -> LigatureSpec {
        match self {
            LigatureEntryConfig::Literal(text) => LigatureSpec::literal(text.as_str()),
            LigatureEntryConfig::Regex { leading, regex } => {
                LigatureSpec::regex(*leading, regex.as_str())
            }
            LigatureEntryConfig::Expr { leading, expr } => LigatureSpec::expr(*leading, expr.clone()),
        }
    }
}

/// A group of ligatures registered together for one selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LigatureSetConfig {
    /// Modes this set applies to; `None` applies to every mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<ModesConfig>,

    /// Ligatures in declaration order
    #[serde(default)]
    pub ligatures: Vec<LigatureEntryConfig>,
}

impl LigatureSetConfig {
    /// Create a set for one mode.
    pub fn for_mode(mode: &str, ligatures: &[&str]) -> Self {
        Self {
            modes: Some(ModesConfig::One(mode.to_string())),
            ligatures: ligatures.iter().map(|l| LigatureEntryConfig::literal(l)).collect(),
        }
    }

    /// Create a set that applies to every mode.
    pub fn universal(ligatures: &[&str]) -> Self {
        Self {
            modes: None,
            ligatures: ligatures.iter().map(|l| LigatureEntryConfig::literal(l)).collect(),
        }
    }

    pub fn selector(&self) -> ModeSelector {
        self.modes
            .as_ref()
            .map_or(ModeSelector::Universal, ModesConfig::to_selector)
    }

    pub fn specs(&self) -> Vec<LigatureSpec> {
        self.ligatures.iter().map(LigatureEntryConfig::to_spec).collect()
    }
}

// ============================================================================
// Mode hierarchy
// ============================================================================

/// Declares `name` as a refinement of `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDeclaration {
    pub name: String,
    pub parent: String,
}

impl ModeDeclaration {
    pub fn new(name: &str, parent: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.to_string(),
        }
    }

    pub fn mode(&self) -> ModeId {
        ModeId::from(self.name.as_str())
    }
}
