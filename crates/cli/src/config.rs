use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_RULES: &str = "Rules/rules.json";
pub const DEFAULT_OUTPUT: &str = "Result";

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("sinktrace")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("sinktrace")
}

fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// User defaults read from `config.toml`. Command-line flags win.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub rules: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub max_states: Option<usize>,
}

impl Config {
    pub fn rules_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.rules.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES))
    }

    pub fn output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn max_states(&self, flag: Option<usize>) -> Option<usize> {
        flag.or(self.max_states)
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("failed to parse config")
}

pub fn load_config() -> Result<Config> {
    let path = config_file_path();
    if path.exists() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_config(&content)
    } else {
        Ok(Config::default())
    }
}
