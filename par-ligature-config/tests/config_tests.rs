//! Integration tests for par-ligature-config: YAML parsing, conversion to
//! rule specs, validation and file persistence.

use par_ligature_config::{Config, ConfigError, LigatureEntryConfig, LigatureSetConfig, ModesConfig};
use par_ligature_rules::{LigatureSpec, ModeSelector, PatternExpr, PatternSource};

const SAMPLE: &str = r#"
ligature_sets:
  - ligatures: ["www"]
  - modes: prog
    ligatures:
      - "=>"
      - "=="
      - { char: "-", regex: "-+>" }
      - char: "="
        expr: { one_or_more: { chars: ["=", ">"] } }
  - modes: [markdown, org]
    ligatures: ["**"]
  - modes: "*"
    ligatures: ["::"]
modes:
  - { name: prog, parent: fundamental }
  - { name: rust, parent: prog }
ignored_modes: [minibuffer-inactive, term]
regex_cache_size: 64
"#;

#[test]
fn test_parse_sample_config() {
    let config = Config::from_yaml(SAMPLE).unwrap();
    assert_eq!(config.ligature_sets.len(), 4);
    assert_eq!(config.modes.len(), 2);
    assert_eq!(config.regex_cache_size, 64);
    assert!(config.is_ignored("term"));
    assert!(!config.is_ignored("rust"));
}

#[test]
fn test_selectors_from_modes_field() {
    let config = Config::from_yaml(SAMPLE).unwrap();
    let selectors: Vec<ModeSelector> = config
        .ligature_sets
        .iter()
        .map(LigatureSetConfig::selector)
        .collect();

    assert_eq!(
        selectors,
        vec![
            ModeSelector::Universal,
            ModeSelector::single("prog"),
            ModeSelector::set(["markdown", "org"]),
            ModeSelector::Universal,
        ]
    );
}

#[test]
fn test_entries_convert_to_specs() {
    let config = Config::from_yaml(SAMPLE).unwrap();
    let specs = config.ligature_sets[1].specs();

    assert_eq!(specs[0], LigatureSpec::literal("=>"));
    assert_eq!(specs[1], LigatureSpec::literal("=="));
    assert_eq!(specs[2], LigatureSpec::regex('-', "-+>"));
    assert_eq!(
        specs[3],
        LigatureSpec::Pattern(
            '=',
            PatternSource::Expr(PatternExpr::OneOrMore(Box::new(PatternExpr::Chars(vec![
                '=', '>'
            ]))))
        )
    );
}

#[test]
fn test_entry_shapes_are_distinguished() {
    let entries: Vec<LigatureEntryConfig> = serde_yaml_ng::from_str(
        r#"
- "->"
- { char: "<", regex: "<+" }
- { char: "*", expr: { str: "**" } }
"#,
    )
    .unwrap();

    assert!(matches!(entries[0], LigatureEntryConfig::Literal(_)));
    assert!(matches!(entries[1], LigatureEntryConfig::Regex { leading: '<', .. }));
    assert!(matches!(entries[2], LigatureEntryConfig::Expr { leading: '*', .. }));
}

#[test]
fn test_modes_field_shapes() {
    let one: ModesConfig = serde_yaml_ng::from_str("prog").unwrap();
    let many: ModesConfig = serde_yaml_ng::from_str("[a, b]").unwrap();
    assert_eq!(one, ModesConfig::One("prog".to_string()));
    assert_eq!(many.to_selector(), ModeSelector::set(["a", "b"]));
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let result = Config::from_yaml("ligature_sets: 12");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_hierarchy_is_validation_error() {
    let yaml = "modes:\n  - { name: prog, parent: prog }\n";
    let result = Config::from_yaml(yaml);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("ligatures.yaml");

    let config = Config::empty()
        .with_ligature_set(LigatureSetConfig::for_mode("prog", &["=>", "->"]))
        .with_mode("rust", "prog")
        .with_ignored_mode("term");
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_default_config_roundtrips_through_yaml() {
    let config = Config::default();
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("one_or_more"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_config_path_layout() {
    let path = Config::config_path();
    assert!(path.ends_with("par-ligature/ligatures.yaml"));
    assert!(path.starts_with(Config::config_dir()));
}
