use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AisleError, Result};
use crate::similarity::DEFAULT_SIMILARITY_THRESHOLD;

/// File name looked up inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Knobs of the resolution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Suggestions must score strictly above this (0.0..1.0)
    pub similarity_threshold: f64,

    /// Offer similar known items before asking for a section
    pub fuzzy_enabled: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            fuzzy_enabled: true,
        }
    }
}

impl ResolverConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.similarity_threshold) {
            return Err(AisleError::config(format!(
                "similarity_threshold ({}) must be in [0, 1)",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

/// User configuration read from `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AisleConfig {
    pub similarity_threshold: f64,
    pub fuzzy_enabled: bool,
    /// Seed the starter sections and items when nothing is stored yet
    pub seed_defaults: bool,
}

impl Default for AisleConfig {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        Self {
            similarity_threshold: resolver.similarity_threshold,
            fuzzy_enabled: resolver.fuzzy_enabled,
            seed_defaults: true,
        }
    }
}

impl AisleConfig {
    /// Load from `path`; a missing file yields the defaults
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config = Self::parse(&contents)
            .map_err(|err| AisleError::config(format!("{}: {err}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|err| AisleError::config(err.to_string()))?;
        config.resolver().validate()?;
        Ok(config)
    }

    pub fn resolver(&self) -> ResolverConfig {
        ResolverConfig {
            similarity_threshold: self.similarity_threshold,
            fuzzy_enabled: self.fuzzy_enabled,
        }
    }
}
