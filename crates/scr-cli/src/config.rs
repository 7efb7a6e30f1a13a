use std::path::Path;

use anyhow::Context;
use scr_crypto::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scr.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub hasher: HashAlgorithm,
    pub format: OutputFormat,
}

impl CliConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("invalid scr config")
    }

    /// Load from an explicit path, else `./scr.toml` if it exists, else
    /// defaults. An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(hasher) = cli.hasher {
            self.hasher = hasher;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        self
    }
}
