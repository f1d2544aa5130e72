//! Rule compiler: ligature specs → per-leading-character patterns.

use std::collections::BTreeMap;

use crate::error::LigatureError;
use crate::pattern::PatternExpander;
use crate::types::{CompiledPattern, LigatureSpec, PatternSource, RuleGroup};

/// Compile a batch of ligature specs into a [`RuleGroup`].
///
/// Specs sharing a leading character accumulate under it. The whole batch
/// fails on the first invalid literal or expansion error.
pub fn compile_rules(
    specs: &[LigatureSpec],
    expander: &dyn PatternExpander,
) -> Result<RuleGroup, LigatureError> {
    let mut by_char: BTreeMap<char, CompiledPattern> = BTreeMap::new();

    for spec in specs {
        match spec {
            LigatureSpec::Literal(text) => {
                let mut chars = text.chars();
                let (Some(leading), Some(_)) = (chars.next(), chars.clone().next()) else {
                    return Err(LigatureError::InvalidLigatureLength {
                        ligature: text.clone(),
                        length: text.chars().count(),
                    });
                };
                by_char
                    .entry(leading)
                    .or_default()
                    .literal_alternatives
                    .push(chars.as_str().to_string());
            }
            LigatureSpec::Pattern(leading, source) => {
                let fragment = match source {
                    PatternSource::Regex(raw) => raw.clone(),
                    PatternSource::Expr(expr) => expander.expand(expr).map_err(|source| {
                        LigatureError::PatternExpansion {
                            character: *leading,
                            source,
                        }
                    })?,
                };
                by_char
                    .entry(*leading)
                    .or_default()
                    .regex_alternatives
                    .push(fragment);
            }
        }
    }

    Ok(by_char.into_iter().collect())
}
