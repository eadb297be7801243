//! Configuration management for ontograph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `ontograph.toml` file
//! 3. User config `~/.config/ontograph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::relation::RelationSet;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ontology source configuration.
    pub ontology: OntologyConfig,

    /// Slim computation configuration.
    pub slim: SlimConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./ontograph.toml` (project local)
    /// 2. `~/.config/ontograph/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `ONTOGRAPH_*` overrides from an arbitrary variable source.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(namespace) = lookup(ENV_NAMESPACE) {
            self.ontology.namespace = namespace;
        }
        if let Some(dir) = lookup(ENV_SOURCE_DIR) {
            self.ontology.source_dir = dir;
        }
        if let Some(root) = lookup(ENV_ROOT_ID) {
            self.ontology.root_id = Some(root);
        }
        if let Some(relations) = lookup(ENV_RELATIONS) {
            self.slim.relations = relations;
        }
    }

    /// Check values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ontology.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("ontology.namespace is empty".to_string()));
        }
        self.slim.relation_set()?;
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Ontology source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Namespace prefix of term ids (e.g. "GO", "ECO").
    pub namespace: String,

    /// Directory containing `terms.tsv`, `relations.tsv` and `subsets.tsv`.
    pub source_dir: String,

    /// Root term; edges pointing at it are not loaded.
    pub root_id: Option<String>,

    /// Compute all ancestor closures at load time.
    pub warm_up: bool,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            root_id: None,
            warm_up: DEFAULT_WARM_UP,
        }
    }
}

/// Slim computation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlimConfig {
    /// Relation filter codes used when none are given explicitly.
    pub relations: String,
}

impl Default for SlimConfig {
    fn default() -> Self {
        Self {
            relations: DEFAULT_SLIM_RELATIONS.to_string(),
        }
    }
}

impl SlimConfig {
    pub fn relation_set(&self) -> Result<RelationSet, ConfigError> {
        RelationSet::parse(&self.relations)
            .map_err(|e| ConfigError::Invalid(format!("slim.relations: {e}")))
    }
}
