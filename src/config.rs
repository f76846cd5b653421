use std::{fs, path::Path};

use serde::Deserialize;

/// Top-level configuration for the letterhead mail pipeline.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub mail: MailConfig,
}

/// Mail pipeline configuration.
#[derive(Debug, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub mailbox: MailboxConfig,
}

/// Settings store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SettingsConfig {
    /// In-memory store, contents lost on restart.
    #[serde(rename = "memory")]
    Memory,

    /// Single-file SQLite store.
    #[serde(rename = "sqlite")]
    Sqlite {
        #[serde(default = "default_settings_path")]
        path: String,
    },
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: default_settings_path(),
        }
    }
}

/// Transformer chain configuration.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    /// Transformers applied to every outgoing email, in order.
    #[serde(default)]
    pub transformers: Vec<TransformerConfig>,
}

/// Configuration for a message transformer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TransformerConfig {
    /// Wraps the email body in the branded HTML layout.
    #[serde(rename = "html_layout")]
    HtmlLayout {
        /// Settings key holding the logo image URL.
        #[serde(default = "default_logo_key")]
        logo_key: String,
    },
}

/// File mailbox configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailboxConfig {
    #[serde(default = "default_mailbox_path")]
    pub path: String,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            path: default_mailbox_path(),
        }
    }
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Errors that can occur while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred reading the file.
    Io(std::io::Error),
    /// A parse error occurred deserializing TOML.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn default_settings_path() -> String {
    "letterhead.db".to_string()
}

fn default_logo_key() -> String {
    crate::settings::LOGO_URL_KEY.to_string()
}

fn default_mailbox_path() -> String {
    "mailbox".to_string()
}
