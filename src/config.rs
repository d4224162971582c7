use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::pattern_cache::PatternCacheConfig;
use crate::pattern_parser::{ParserConfig, DEFAULT_MARKER, DEFAULT_MAX_DEPTH};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Matching configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Identifier that marks a presence-only field in pattern text
    #[validate(custom(function = "validate_marker"))]
    pub marker: String,

    /// Maximum nesting of `{ }` blocks in a pattern
    #[validate(range(min = 1, max = 128, message = "Max depth must be between 1 and 128"))]
    pub max_depth: usize,

    /// Whether parsed patterns are cached
    pub cache_enabled: bool,

    /// Maximum number of cached patterns
    #[validate(range(min = 1, message = "Cache must hold at least one entry"))]
    pub cache_max_entries: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            cache_enabled: true,
            cache_max_entries: 1000,
        }
    }
}

fn validate_marker(marker: &str) -> Result<(), ValidationError> {
    let mut chars = marker.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    // `undefined` would be ambiguous with the empty pattern
    if !valid || marker == "undefined" {
        let mut err = ValidationError::new("invalid_marker");
        err.message = Some("Marker must be an identifier other than 'undefined'".into());
        return Err(err);
    }
    Ok(())
}

impl MatchConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            marker: env::var("SHAPEMATCH_MARKER").unwrap_or_else(|_| DEFAULT_MARKER.to_string()),
            max_depth: parse_env_var("SHAPEMATCH_MAX_DEPTH", "64")?,
            cache_enabled: parse_env_var("SHAPEMATCH_PATTERN_CACHE_ENABLED", "true")?,
            cache_max_entries: parse_env_var("SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES", "1000")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    ///
    /// Starts from the YAML file when one is given, otherwise from the
    /// environment; explicit CLI values override either.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = match &cli.config_file {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::from_env()?,
        };

        if let Some(marker) = cli.marker {
            config.marker = marker;
        }
        if let Some(max_depth) = cli.max_depth {
            config.max_depth = max_depth;
        }
        if cli.no_cache {
            config.cache_enabled = false;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            marker: self.marker.clone(),
            max_depth: self.max_depth,
        }
    }

    pub fn cache_config(&self) -> PatternCacheConfig {
        PatternCacheConfig {
            enabled: self.cache_enabled,
            max_entries: self.cache_max_entries,
        }
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub config_file: Option<PathBuf>,
    pub marker: Option<String>,
    pub max_depth: Option<usize>,
    pub no_cache: bool,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
