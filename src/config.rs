use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classify::{DomainClassifier, DomainRule, AUXILIARY_SERVICES, MISCELLANEOUS};

/// Default config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "domainmap.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub domainmap: DomainmapConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub mermaid: MermaidConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct DomainmapConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DomainmapConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Classification settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Auxiliary tables start with this prefix (default `aux_table_`).
    #[serde(default)]
    pub auxiliary_prefix: Option<String>,
    /// Auxiliary tables match this regex. Mutually exclusive with `auxiliary_prefix`.
    #[serde(default)]
    pub auxiliary_pattern: Option<String>,
    #[serde(default = "default_fallback_domain")]
    pub fallback_domain: String,
    #[serde(default = "default_auxiliary_domain")]
    pub auxiliary_domain: String,
    /// Signature rules in priority order; the built-in list when omitted.
    #[serde(default)]
    pub rules: Option<Vec<DomainRule>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            auxiliary_prefix: None,
            auxiliary_pattern: None,
            fallback_domain: default_fallback_domain(),
            auxiliary_domain: default_auxiliary_domain(),
            rules: None,
        }
    }
}

/// Mermaid diagram settings
#[derive(Debug, Clone, Deserialize)]
pub struct MermaidConfig {
    #[serde(default = "default_max_tables_per_chunk")]
    pub max_tables_per_chunk: usize,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            max_tables_per_chunk: default_max_tables_per_chunk(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_domain() -> String {
    MISCELLANEOUS.to_string()
}

fn default_auxiliary_domain() -> String {
    AUXILIARY_SERVICES.to_string()
}

fn default_max_tables_per_chunk() -> usize {
    20
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for the config file in this order:
    /// 1. `explicit` path (the `--config` flag)
    /// 2. Path specified in DOMAINMAP_CONFIG environment variable
    /// 3. ./domainmap.toml in current directory
    ///
    /// A named file that is missing is an error; a missing ./domainmap.toml means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("DOMAINMAP_CONFIG").ok().map(PathBuf::from));

        let config_path = match named {
            Some(path) => path,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    let config = Config::default();
                    config.validate()?;
                    return Ok(config);
                }
                default_path
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.classifier.fallback_domain.trim().is_empty() {
            anyhow::bail!("classifier.fallback_domain must not be empty");
        }

        if self.classifier.auxiliary_domain.trim().is_empty() {
            anyhow::bail!("classifier.auxiliary_domain must not be empty");
        }

        if let Some(rules) = &self.classifier.rules {
            for (idx, rule) in rules.iter().enumerate() {
                if rule.domain.trim().is_empty() {
                    anyhow::bail!("classifier.rules[{}].domain must not be empty", idx);
                }
                if rule.all_of.is_empty() && rule.any_of.is_empty() {
                    anyhow::bail!(
                        "classifier.rules[{}] ({}) needs at least one table in all_of or any_of",
                        idx,
                        rule.domain
                    );
                }
            }
        }

        // Prefix/pattern conflicts and bad regexes
        DomainClassifier::from_config(&self.classifier)?;

        if self.mermaid.max_tables_per_chunk == 0 {
            anyhow::bail!("mermaid.max_tables_per_chunk must be greater than 0");
        }

        Ok(())
    }

    /// Classifier configured from the `[classifier]` section
    pub fn classifier(&self) -> Result<DomainClassifier> {
        Ok(DomainClassifier::from_config(&self.classifier)?)
    }
}
