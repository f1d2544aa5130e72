//! Dispatch-side ligature matching.
//!
//! For every leading character in a [`GeneratedTable`], the pattern is
//! compiled once as `^(?:pattern)` and applied to the text that follows the
//! character. A match of at least one character marks a ligature span the
//! shaping engine should substitute.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use par_ligature_rules::{CompiledPattern, GeneratedTable};
use regex::Regex;

/// Compiled regexes shared across matchers, keyed by rendered pattern.
pub struct RegexCache {
    cache: LruCache<String, Regex>,
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("len", &self.cache.len())
            .field("cap", &self.cache.cap())
            .finish()
    }
}

impl RegexCache {
    /// Create a cache holding at most `capacity` compiled regexes (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Anchored regex for `pattern`, compiling it on a miss.
    pub fn compile(&mut self, pattern: &CompiledPattern) -> Result<Regex, regex::Error> {
        let source = format!("^{}", pattern.render());
        if let Some(regex) = self.cache.get(&source) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&source)?;
        self.cache.put(source, regex.clone());
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// A ligature found in a run of text. Positions are in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigatureSpan {
    /// Character index of the leading character
    pub start: usize,
    /// Number of characters covered, including the leading one
    pub len: usize,
    /// The covered text
    pub text: String,
}

/// Matches text against one mode's dispatch table.
#[derive(Debug)]
pub struct LigatureMatcher {
    table: Arc<GeneratedTable>,
    regexes: HashMap<char, Regex>,
}

impl LigatureMatcher {
    /// Compile every pattern in `table`.
    ///
    /// Patterns that fail to compile are logged and skipped.
    pub fn new(table: Arc<GeneratedTable>, cache: &mut RegexCache) -> Self {
        let mut regexes = HashMap::with_capacity(table.len());
        for (leading, pattern) in table.iter() {
            match cache.compile(pattern) {
                Ok(regex) => {
                    regexes.insert(leading, regex);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to compile ligature pattern for '{}' in mode '{}': {}",
                        leading,
                        table.mode(),
                        e
                    );
                }
            }
        }

        Self { table, regexes }
    }

    pub fn table(&self) -> &Arc<GeneratedTable> {
        &self.table
    }

    /// Length in characters of the ligature starting at `char_index`.
    pub fn match_len_at(&self, text: &str, char_index: usize) -> Option<usize> {
        let (byte_offset, leading) = text.char_indices().nth(char_index)?;
        self.match_len_from(text, byte_offset, leading)
    }

    /// All non-overlapping ligature spans, scanning left to right.
    pub fn find_ligatures(&self, text: &str) -> Vec<LigatureSpan> {
        let mut spans = Vec::new();
        let mut chars = text.char_indices().enumerate();

        while let Some((char_index, (byte_offset, leading))) = chars.next() {
            let Some(len) = self.match_len_from(text, byte_offset, leading) else {
                continue;
            };

            spans.push(LigatureSpan {
                start: char_index,
                len,
                text: text[byte_offset..].chars().take(len).collect(),
            });
            // Skip the rest of the span
            if len > 1 {
                chars.nth(len - 2);
            }
        }

        spans
    }

    fn match_len_from(&self, text: &str, byte_offset: usize, leading: char) -> Option<usize> {
        let regex = self.regexes.get(&leading)?;
        let rest = &text[byte_offset + leading.len_utf8()..];
        let found = regex.find(rest)?;
        let tail_chars = found.as_str().chars().count();
        (tail_chars > 0).then_some(tail_chars + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use par_ligature_rules::{LigatureSpec, LigatureTables, ModeId, ModeSelector};

    fn matcher(specs: &[LigatureSpec]) -> LigatureMatcher {
        let mut tables = LigatureTables::new();
        tables.register(ModeSelector::Universal, specs).unwrap();
        let table = tables.generate(&ModeId::from("test"));
        LigatureMatcher::new(table, &mut RegexCache::new(16))
    }

    #[test]
    fn test_longest_literal_wins() {
        let m = matcher(&[
            LigatureSpec::literal("=="),
            LigatureSpec::literal("==="),
        ]);
        assert_eq!(m.match_len_at("a === b", 2), Some(3));
        assert_eq!(m.match_len_at("a == b", 2), Some(2));
        assert_eq!(m.match_len_at("a = b", 2), None);
    }

    #[test]
    fn test_regex_tried_before_literals() {
        let m = matcher(&[
            LigatureSpec::literal("->"),
            LigatureSpec::regex('-', "-+>"),
        ]);
        assert_eq!(m.match_len_at("--->", 0), Some(4));
        assert_eq!(m.match_len_at("->", 0), Some(2));
    }

    #[test]
    fn test_find_ligatures_non_overlapping() {
        let m = matcher(&[LigatureSpec::literal("=>"), LigatureSpec::literal("==")]);
        let spans = m.find_ligatures("x ==> y => z");

        assert_eq!(
            spans,
            vec![
                LigatureSpan {
                    start: 2,
                    len: 2,
                    text: "==".to_string(),
                },
                LigatureSpan {
                    start: 8,
                    len: 2,
                    text: "=>".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_multibyte_text_positions() {
        let m = matcher(&[LigatureSpec::literal("->")]);
        let spans = m.find_ligatures("λ -> μ");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 2);
        assert_eq!(spans[0].text, "->");
    }

    #[test]
    fn test_empty_match_is_not_a_ligature() {
        let m = matcher(&[LigatureSpec::regex('=', "=*")]);
        assert_eq!(m.match_len_at("= x", 0), None);
        assert_eq!(m.match_len_at("=== x", 0), Some(3));
    }

    #[test]
    fn test_invalid_regex_is_skipped() {
        let m = matcher(&[LigatureSpec::regex('(', "(unclosed"), LigatureSpec::literal("=>")]);
        assert_eq!(m.match_len_at("(unclosed", 0), None);
        assert_eq!(m.match_len_at("=>", 0), Some(2));
    }

    #[test]
    fn test_regex_cache_shares_compiled_patterns() {
        let pattern = CompiledPattern {
            regex_alternatives: vec![],
            literal_alternatives: vec![">".to_string()],
        };
        let mut cache = RegexCache::new(4);
        cache.compile(&pattern).unwrap();
        cache.compile(&pattern).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_regex_cache_evicts_least_recent() {
        let mut cache = RegexCache::new(1);
        for tail in ["a", "b"] {
            let pattern = CompiledPattern {
                regex_alternatives: vec![],
                literal_alternatives: vec![tail.to_string()],
            };
            cache.compile(&pattern).unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
