//! Typed errors for rule registration.

use thiserror::Error;

use crate::pattern::ExpansionError;

/// Errors raised by [`LigatureTables::register`](crate::LigatureTables::register).
///
/// Any error aborts the whole registration batch; previously registered
/// rules and cached tables are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LigatureError {
    /// A literal ligature has fewer than two characters.
    #[error("Invalid ligature '{ligature}': literal ligatures need at least 2 characters, got {length}")]
    InvalidLigatureLength {
        /// The offending literal.
        ligature: String,
        /// Its length in characters.
        length: usize,
    },

    /// The pattern expander rejected the expression attached to a character.
    #[error("Pattern expansion failed for '{character}': {source}")]
    PatternExpansion {
        /// Leading character the expression was registered for.
        character: char,
        /// Underlying expander error.
        #[source]
        source: ExpansionError,
    },
}
