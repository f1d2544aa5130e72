//! Ligature configuration: struct, validation and persistence.
//!
//! Covers:
//! - `Config` and its `Default` impl
//! - `load` / `save` (YAML file I/O with atomic write)
//! - Path helpers (`config_path`, `config_dir`)
//! - Conversion of mode declarations into a [`ModeTree`]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use par_ligature_rules::ModeTree;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{LigatureSetConfig, ModeDeclaration};

const CONFIG_DIR_NAME: &str = "par-ligature";
const CONFIG_FILE_NAME: &str = "ligatures.yaml";

/// Ligature configuration loaded from `ligatures.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ligature sets, registered in file order (later sets take precedence)
    #[serde(default = "crate::defaults::ligature_sets")]
    pub ligature_sets: Vec<LigatureSetConfig>,

    /// Mode hierarchy declarations (`name` refines `parent`)
    #[serde(default = "crate::defaults::mode_declarations")]
    pub modes: Vec<ModeDeclaration>,

    /// Modes that never get ligatures
    #[serde(default = "crate::defaults::ignored_modes")]
    pub ignored_modes: Vec<String>,

    /// Maximum number of compiled regexes kept by the dispatch matcher
    #[serde(default = "crate::defaults::regex_cache_size")]
    pub regex_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ligature_sets: crate::defaults::ligature_sets(),
            modes: crate::defaults::mode_declarations(),
            ignored_modes: crate::defaults::ignored_modes(),
            regex_cache_size: crate::defaults::regex_cache_size(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with no ligature sets, no modes and nothing ignored.
    pub fn empty() -> Self {
        Self {
            ligature_sets: Vec::new(),
            modes: Vec::new(),
            ignored_modes: Vec::new(),
            regex_cache_size: crate::defaults::regex_cache_size(),
        }
    }

    pub fn with_ligature_set(mut self, set: LigatureSetConfig) -> Self {
        self.ligature_sets.push(set);
        self
    }

    pub fn with_mode(mut self, name: &str, parent: &str) -> Self {
        self.modes.push(ModeDeclaration::new(name, parent));
        self
    }

    pub fn with_ignored_mode(mut self, mode: &str) -> Self {
        self.ignored_modes.push(mode.to_string());
        self
    }

    // ========================================================================
    // Parsing and validation
    // ========================================================================

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check cross-field constraints serde cannot express.
    ///
    /// Ligature lengths are not checked here; the rule compiler rejects
    /// short literals at registration time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regex_cache_size == 0 {
            return Err(ConfigError::Validation(
                "regex_cache_size must be greater than 0".to_string(),
            ));
        }

        let mut declared = HashSet::new();
        for decl in &self.modes {
            if decl.name.is_empty() || decl.parent.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "mode declaration '{}' -> '{}' has an empty name",
                    decl.name, decl.parent
                )));
            }
            if decl.name == decl.parent {
                return Err(ConfigError::Validation(format!(
                    "mode '{}' cannot be its own parent",
                    decl.name
                )));
            }
            if !declared.insert(decl.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "mode '{}' is declared more than once",
                    decl.name
                )));
            }
        }

        Ok(())
    }

    /// Build the mode hierarchy from the `modes` declarations.
    pub fn mode_tree(&self) -> ModeTree {
        let mut tree = ModeTree::new();
        for decl in &self.modes {
            tree.declare(decl.name.as_str(), decl.parent.as_str());
        }
        tree
    }

    pub fn is_ignored(&self, mode: &str) -> bool {
        self.ignored_modes.iter().any(|m| m == mode)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Load configuration from the default path, creating it when missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            log::info!("Loading existing config from {:?}", config_path);
            Self::load_from(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path.display()))
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        log::debug!(
            "Loaded {} ligature sets and {} mode declarations from {:?}",
            config.ligature_sets.len(),
            config.modes.len(),
            path
        );
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        self.save_to(&config_path)
            .with_context(|| format!("Failed to save config to {}", config_path.display()))
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = self.to_yaml()?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (`~/.config/par-ligature/ligatures.yaml`)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(CONFIG_DIR_NAME)
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join(CONFIG_DIR_NAME)
            } else {
                PathBuf::from(".")
            }
        }
    }
}
