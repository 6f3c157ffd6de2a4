//! Configuration management for ontograph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `ontograph.toml` file
//! 3. User config `~/.config/ontograph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

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
    /// Where and how the exported tables are read.
    pub source: SourceConfig,

    /// Ontology-specific settings.
    pub ontology: OntologyConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./ontograph.toml` (project local)
    /// 2. `~/.config/ontograph/config.toml` (user config)
    /// 3. Falls back to defaults
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
        if let Ok(dir) = std::env::var("ONTOGRAPH_DATA_DIR") {
            self.source.data_dir = dir;
        }
        if let Ok(root) = std::env::var("ONTOGRAPH_ROOT_TERM") {
            self.ontology.root_term = root;
        }
        if let Ok(label) = std::env::var("ONTOGRAPH_TARGET_ONTOLOGY") {
            self.ontology.cross_mapping_target = label;
        }
    }

    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.field_delimiter_byte()?;
        if self.source.list_separators.is_empty() {
            return Err(ConfigError::Invalid(
                "source.list_separators must not be empty".to_string(),
            ));
        }
        if self.ontology.root_term.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "ontology.root_term must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        Config::default().to_toml_string()
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Exported table location and format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory containing the table files.
    pub data_dir: String,

    /// Single-byte field delimiter.
    pub field_delimiter: String,

    /// Every character here separates ids inside list columns.
    pub list_separators: String,

    /// Table file names, relative to `data_dir`.
    pub tables: TableFiles,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            field_delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
            list_separators: DEFAULT_LIST_SEPARATORS.to_string(),
            tables: TableFiles::default(),
        }
    }
}

impl SourceConfig {
    /// Get the data directory as a path.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// The field delimiter as the single byte the TSV reader expects.
    pub fn field_delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.field_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(ConfigError::Invalid(format!(
                "source.field_delimiter must be a single ASCII character, got {:?}",
                self.field_delimiter
            ))),
        }
    }

    /// List separators as characters.
    pub fn separators(&self) -> Vec<char> {
        self.list_separators.chars().collect()
    }
}

/// File names of the exported tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub terms: String,
    pub node2term: String,
    pub backtrace: String,
    pub fullpath: String,
    pub synonyms: String,
    pub alt_ids: String,
    pub cross_mappings: String,
    /// Pattern containing `{label}`.
    pub target_terms: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            terms: DEFAULT_TERMS_FILE.to_string(),
            node2term: DEFAULT_NODE2TERM_FILE.to_string(),
            backtrace: DEFAULT_BACKTRACE_FILE.to_string(),
            fullpath: DEFAULT_FULLPATH_FILE.to_string(),
            synonyms: DEFAULT_SYNONYMS_FILE.to_string(),
            alt_ids: DEFAULT_ALT_IDS_FILE.to_string(),
            cross_mappings: DEFAULT_CROSS_MAPPINGS_FILE.to_string(),
            target_terms: DEFAULT_TARGET_TERMS_FILE.to_string(),
        }
    }
}

impl TableFiles {
    /// Term-info file name for a target ontology label.
    pub fn target_terms_for(&self, label: &str) -> String {
        self.target_terms
            .replace(TARGET_LABEL_PLACEHOLDER, &label.to_lowercase())
    }
}

/// Ontology configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Short name of the served ontology.
    pub name: String,

    /// Root term id. Excluded from the term registry and from ancestor sets.
    pub root_term: String,

    /// Target label used by `cross_mapping_of`.
    pub cross_mapping_target: String,

    /// Further target labels to load alongside the default one.
    pub extra_mapping_targets: Vec<String>,

    /// Only keep mappings whose target appears in the target term-info table.
    pub join_target_terms: bool,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ONTOLOGY_NAME.to_string(),
            root_term: DEFAULT_ROOT_TERM.to_string(),
            cross_mapping_target: DEFAULT_CROSS_MAPPING_TARGET.to_string(),
            extra_mapping_targets: Vec::new(),
            join_target_terms: true,
        }
    }
}

impl OntologyConfig {
    /// All target labels to load, default first, without duplicates.
    pub fn mapping_targets(&self) -> Vec<String> {
        let mut labels = vec![self.cross_mapping_target.clone()];
        for label in &self.extra_mapping_targets {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        labels
    }
}
