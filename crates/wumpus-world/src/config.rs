//! Simulation configuration, loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::WorldLayout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step budget for a single run
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Cave layout; omitted fields fall back to the reference cave
    #[serde(default)]
    pub world: WorldLayout,
}

fn default_max_steps() -> u64 {
    64
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            world: WorldLayout::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        tracing::debug!(path = %path.display(), max_steps = config.max_steps, "config loaded");
        Ok(config)
    }

    /// `path` if given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            anyhow::bail!("max_steps must be at least 1");
        }
        self.world.validate().context("Invalid world layout")?;
        Ok(())
    }
}
