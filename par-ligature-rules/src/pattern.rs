//! Pattern expressions and their lowering to regex source text.
//!
//! Ligature patterns may be written as a small structured expression
//! instead of raw regex syntax:
//!
//! ```ignore
//! // `=` followed by one or more of `=`, `>` or `<`
//! let expr = PatternExpr::OneOrMore(Box::new(PatternExpr::Chars(vec!['=', '>', '<'])));
//! let source = RegexExpander.expand(&expr)?; // "[=><]+"
//! ```
//!
//! The rule tables never interpret expressions themselves; they call the
//! [`PatternExpander`] they were built with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured, regex-free description of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternExpr {
    /// Literal text
    Str(String),
    /// Any one of the listed characters
    Chars(Vec<char>),
    /// First matching alternative
    Or(Vec<PatternExpr>),
    /// Concatenation
    Seq(Vec<PatternExpr>),
    Optional(Box<PatternExpr>),
    ZeroOrMore(Box<PatternExpr>),
    OneOrMore(Box<PatternExpr>),
    /// Bounded repetition; `max: None` means unbounded
    Repeat {
        expr: Box<PatternExpr>,
        min: u32,
        #[serde(default)]
        max: Option<u32>,
    },
    /// Raw regex source embedded as-is
    Regex(String),
}

/// Failure to lower a [`PatternExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("alternation has no alternatives")]
    EmptyAlternation,

    #[error("character set is empty")]
    EmptyCharSet,

    #[error("repeat bounds are inverted: min {min} > max {max}")]
    InvalidRepeat { min: u32, max: u32 },
}

/// Lowers pattern expressions to string patterns.
pub trait PatternExpander {
    fn expand(&self, expr: &PatternExpr) -> Result<String, ExpansionError>;
}

/// Default expander targeting the `regex` crate syntax.
///
/// Raw [`PatternExpr::Regex`] fragments are not validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExpander;

impl PatternExpander for RegexExpander {
    fn expand(&self, expr: &PatternExpr) -> Result<String, ExpansionError> {
        lower(expr).map(|fragment| fragment.source)
    }
}

/// Lowered regex text. `atomic` fragments can take a quantifier directly.
struct Fragment {
    source: String,
    atomic: bool,
}

impl Fragment {
    fn atom(source: String) -> Self {
        Self {
            source,
            atomic: true,
        }
    }

    fn compound(source: String) -> Self {
        Self {
            source,
            atomic: false,
        }
    }

    fn grouped(self) -> String {
        if self.atomic {
            self.source
        } else {
            format!("(?:{})", self.source)
        }
    }
}

fn lower(expr: &PatternExpr) -> Result<Fragment, ExpansionError> {
    match expr {
        PatternExpr::Str(text) => {
            let atomic = text.chars().count() == 1;
            Ok(Fragment {
                source: regex::escape(text),
                atomic,
            })
        }
        PatternExpr::Chars(chars) => match chars.as_slice() {
            [] => Err(ExpansionError::EmptyCharSet),
            [single] => Ok(Fragment::atom(regex::escape(&single.to_string()))),
            many => {
                let class: String = many.iter().map(|c| class_member(*c)).collect();
                Ok(Fragment::atom(format!("[{class}]")))
            }
        },
        PatternExpr::Or(alternatives) => {
            if alternatives.is_empty() {
                return Err(ExpansionError::EmptyAlternation);
            }
            let parts = alternatives
                .iter()
                .map(|alt| lower(alt).map(|f| f.source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Fragment::atom(format!("(?:{})", parts.join("|"))))
        }
        PatternExpr::Seq(items) => {
            let mut parts = items.iter().map(lower).collect::<Result<Vec<_>, _>>()?;
            if parts.len() == 1 {
                return Ok(parts.remove(0));
            }
            // Alternations are always emitted grouped, so plain concatenation is safe
            let source: String = parts.into_iter().map(|f| f.source).collect();
            Ok(Fragment::compound(source))
        }
        PatternExpr::Optional(inner) => quantified(inner, "?"),
        PatternExpr::ZeroOrMore(inner) => quantified(inner, "*"),
        PatternExpr::OneOrMore(inner) => quantified(inner, "+"),
        PatternExpr::Repeat { expr, min, max } => {
            let suffix = match max {
                Some(max) if max < min => {
                    return Err(ExpansionError::InvalidRepeat {
                        min: *min,
                        max: *max,
                    });
                }
                Some(max) if max == min => format!("{{{min}}}"),
                Some(max) => format!("{{{min},{max}}}"),
                None => format!("{{{min},}}"),
            };
            quantified(expr, &suffix)
        }
        PatternExpr::Regex(raw) => Ok(Fragment::atom(format!("(?:{raw})"))),
    }
}

fn quantified(inner: &PatternExpr, suffix: &str) -> Result<Fragment, ExpansionError> {
    let inner = lower(inner)?;
    Ok(Fragment::compound(format!("{}{suffix}", inner.grouped())))
}

/// Escape a character for use inside a `[...]` class.
fn class_member(c: char) -> String {
    match c {
        '\\' | ']' | '[' | '^' | '-' | '&' | '~' => format!("\\{c}"),
        _ => c.to_string(),
    }
}
