//! Configuration loading and types for quire.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// Re-export all types for convenient access
pub use types::{ContentConfig, MarkdownConfig, SiteConfig};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "quire.yaml";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Top-level config
// =============================================================================

/// The site configuration for a single pipeline run.
///
/// Every section is optional in the YAML file; a missing section takes its
/// defaults, so an empty (or absent) `quire.yaml` is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Config {
    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let permalink = &self.content.permalink;
        if !permalink.contains(":slug") && !permalink.contains(":title") {
            return Err(ConfigError::Validation(format!(
                "invalid config: permalink '{permalink}' must contain ':slug' or ':title'"
            )));
        }
        if self.content.default_layout.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'content.default_layout' cannot be empty".to_string(),
            ));
        }
        if self.content.category_dir.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'content.category_dir' cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
