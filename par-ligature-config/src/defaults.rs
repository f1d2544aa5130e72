//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

use par_ligature_rules::PatternExpr;

use crate::types::{LigatureEntryConfig, LigatureSetConfig, ModeDeclaration};

/// Programming ligatures supported by most coding fonts (Fira Code,
/// JetBrains Mono, Cascadia Code, Iosevka).
const PROG_LIGATURES: &[&str] = &[
    "<==>", "<!--", "####", "|||>", "<|||", "~~>", "***", "||=", "||>", ":::", "::=", "=:=",
    "===", "==>", "=!=", "=>>", "=<<", "=/=", "!==", "!!.", ">=>", ">>=", ">>>", ">>-", ">->",
    "->>", "-->", "---", "-<<", "<~~", "<~>", "<*>", "<||", "<|>", "<$>", "<==", "<=>", "<=<",
    "<->", "<--", "<-<", "<<=", "<<-", "<<<", "<+>", "</>", "###", "..<", "...", "+++", "/==",
    "///", "_|_", "&&", "^=", "~~", "~@", "~=", "~>", "~-", "**", "*>", "*/", "||", "|}", "|]",
    "|=", "|>", "|-", "{|", "[|", "]#", "::", ":=", ":>", ":<", "$>", "==", "=>", "!=", "!!",
    ">:", ">=", ">>", ">-", "-~", "-|", "->", "--", "-<", "<~", "<*", "<|", "<:", "<$", "<=",
    "<>", "<-", "<<", "<+", "</", "#{", "#[", "#:", "#=", "#!", "##", "#(", "#?", "#_", "%%",
    ".=", ".-", "..", ".?", "+>", "++", "?:", "?=", "?.", "??", ";;", "/*", "/=", "/>", "//",
    "__", "://",
];

pub fn ligature_sets() -> Vec<LigatureSetConfig> {
    let mut prog = LigatureSetConfig::for_mode("prog", PROG_LIGATURES);
    // Arbitrarily long arrows and equality chains
    prog.ligatures.push(LigatureEntryConfig::Expr {
        leading: '=',
        expr: PatternExpr::OneOrMore(Box::new(PatternExpr::Chars(vec![
            '>', '<', '|', '/', '~', ':', '!', '=',
        ]))),
    });
    prog.ligatures.push(LigatureEntryConfig::Expr {
        leading: '-',
        expr: PatternExpr::OneOrMore(Box::new(PatternExpr::Chars(vec!['>', '<', '~', '-']))),
    });

    vec![
        LigatureSetConfig::universal(&["www"]),
        LigatureSetConfig::for_mode("text", &["ff", "fi", "ffi"]),
        prog,
    ]
}

pub fn mode_declarations() -> Vec<ModeDeclaration> {
    [
        ("prog", "fundamental"),
        ("text", "fundamental"),
        ("c", "prog"),
        ("cpp", "c"),
        ("rust", "prog"),
        ("python", "prog"),
        ("javascript", "prog"),
        ("typescript", "javascript"),
        ("go", "prog"),
        ("haskell", "prog"),
        ("shell", "prog"),
        ("markdown", "text"),
        ("org", "text"),
    ]
    .into_iter()
    .map(|(name, parent)| ModeDeclaration::new(name, parent))
    .collect()
}

pub fn ignored_modes() -> Vec<String> {
    vec!["minibuffer-inactive".to_string()]
}

pub fn regex_cache_size() -> usize {
    256
}
