use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::document::parsing::delimiter::DelimiterScanner;

/// User configuration for docx-formula-mover
///
/// Every field has a default, so a partial file (or none at all) is fine.
/// Command-line flags take precedence over these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output root used when `--out` is not given
    pub output_root: Option<PathBuf>,
    /// Descend into subdirectories when the input is a directory
    pub recursive: bool,
    /// Files scanned concurrently
    pub jobs: usize,
    pub delimiter: DelimiterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterConfig {
    /// Character that, doubled, opens and closes display math
    pub marker: char,
    /// Character that suppresses a doubled marker directly after it
    pub escape: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_root: None,
            recursive: true,
            jobs: default_jobs(),
            delimiter: DelimiterConfig::default(),
        }
    }
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        let scanner = DelimiterScanner::default();
        DelimiterConfig {
            marker: scanner.marker,
            escape: scanner.escape,
        }
    }
}

impl DelimiterConfig {
    pub fn scanner(&self) -> DelimiterScanner {
        DelimiterScanner::new(self.marker, self.escape)
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Config {
    /// Load config from the config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::from_toml(&fs::read_to_string(&config_path)?);
            }
        }

        Ok(Config::default())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            bail!("jobs must be at least 1");
        }
        if self.delimiter.marker == self.delimiter.escape {
            bail!(
                "delimiter marker and escape must differ (both are {:?})",
                self.delimiter.marker
            );
        }
        Ok(())
    }

    /// Write the config file, creating its directory on first use.
    /// Does nothing on platforms without a config directory.
    pub fn save(&self) -> Result<()> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(());
        };
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docx-formula-mover").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<()> {
        Config::default().save()
    }
}
