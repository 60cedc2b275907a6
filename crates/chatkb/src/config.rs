//! Configuration management for chatkb
//!
//! Loads the YAML config file describing the upstream API, the listen address,
//! the offered models and where the data files live.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable consulted when the config file has no API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Failed to parse config file: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("Invalid configuration: {message}")]
  Invalid { message: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub server: ServerConfig,
  pub models: ModelsConfig,
  #[serde(default)]
  pub storage: StorageConfig,
}

/// Upstream chat-completion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the OpenAI-compatible API, e.g. `https://api.openai.com/v1`
  pub base_url: String,
  #[serde(default)]
  pub api_key: String,
  /// Upper bound on a single completion call
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  /// Port, written either as `8080` or `:8080`
  #[serde(default = "default_port")]
  pub port: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
  /// Model used when a chat request names none
  pub default: String,
  #[serde(default)]
  pub available: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
  #[serde(default = "default_data_dir")]
  pub data_dir: PathBuf,
}

fn default_timeout_secs() -> u64 {
  60
}
fn default_host() -> String {
  "127.0.0.1".to_string()
}
fn default_port() -> String {
  ":8080".to_string()
}
fn default_data_dir() -> PathBuf {
  PathBuf::from("data")
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self { data_dir: default_data_dir() }
  }
}

impl ServerConfig {
  /// Listen address as `host:port`
  pub fn bind_address(&self) -> String {
    let port = self.port.trim_start_matches(':');
    format!("{}:{}", self.host, port)
  }
}

impl StorageConfig {
  pub fn recent_qas_path(&self) -> PathBuf {
    self.data_dir.join("recent_qas.json")
  }

  pub fn knowledge_path(&self) -> PathBuf {
    self.data_dir.join("knowledge.json")
  }
}

impl Config {
  /// Load, fill in environment fallbacks and validate a config file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

    let mut config = Self::from_yaml_str(&content)?;
    config.fill_api_key_from(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
  }

  pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
  }

  /// Use the environment's API key when the file leaves it blank
  pub fn fill_api_key_from<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if self.api.api_key.is_empty() {
      if let Some(key) = lookup(API_KEY_ENV) {
        self.api.api_key = key;
      }
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.api.base_url.trim().is_empty() {
      return Err(ConfigError::Invalid { message: "api.base_url must not be empty".to_string() });
    }
    if self.models.default.trim().is_empty() {
      return Err(ConfigError::Invalid { message: "models.default must not be empty".to_string() });
    }
    Ok(())
  }
}
