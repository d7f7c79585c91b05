//! Configuration management for the Tiresias CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tiresias::prelude::*;

pub const CONFIG_FILE: &str = "tiresias.toml";

/// Tiresias audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub attack: AttackSection,
    #[serde(default)]
    pub candidates: CandidatesSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSection {
    /// Column of the model's feature layout under attack. Signed so that a
    /// negative value in the file is reported rather than failing to parse.
    #[serde(default)]
    pub attack_feature: i64,
}

/// Candidate values and priors. Once the section is present both lists
/// must be given; neither is filled in implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatesSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priors: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for AttackSection {
    fn default() -> Self {
        Self { attack_feature: 0 }
    }
}

impl Default for CandidatesSection {
    fn default() -> Self {
        Self {
            values: Some(vec![0.0, 1.0]),
            priors: Some(vec![0.5, 0.5]),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load config from tiresias.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Attack configuration, with an optional command-line override.
    pub fn attack_config(&self, attack_feature: Option<i64>) -> Result<AttackConfig> {
        let index = attack_feature.unwrap_or(self.attack.attack_feature);
        Ok(AttackConfig::new(index)?)
    }

    pub fn candidate_set(&self) -> Result<CandidateSet> {
        let candidates = CandidateSet::from_parts(
            self.candidates.values.clone(),
            self.candidates.priors.clone(),
        )
        .context("Invalid [candidates] section")?;
        Ok(candidates)
    }
}

/// Find tiresias.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
