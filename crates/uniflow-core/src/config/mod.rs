mod channels;
mod defaults;

#[cfg(test)]
mod tests;

pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::UniflowError;
use defaults::*;

/// Top-level UniFlow configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub uniflow: UniflowConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniflowConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write logs to a daily rolling file under `{data_dir}/logs/`.
    #[serde(default)]
    pub log_to_file: bool,
    /// Language of bot replies ("English" or "Russian").
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for UniflowConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_to_file: false,
            language: default_language(),
        }
    }
}

/// SQLite storage config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Dialogue session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle minutes after which an unfinished wizard is discarded.
    #[serde(default = "default_session_ttl")]
    pub ttl_minutes: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Bot behaviour knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Color assigned to contexts created through the chat wizard.
    #[serde(default = "default_context_color")]
    pub default_context_color: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            default_context_color: default_context_color(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. An empty Telegram
/// token is filled from `TELEGRAM_BOT_TOKEN`.
pub fn load(path: &str) -> Result<Config, UniflowError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            UniflowError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str::<Config>(&content)
            .map_err(|e| UniflowError::Config(format!("failed to parse config: {}", e)))?
    } else {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    apply_env_overrides(&mut config, std::env::var("TELEGRAM_BOT_TOKEN").ok());
    Ok(config)
}

fn apply_env_overrides(config: &mut Config, telegram_token: Option<String>) {
    let Some(token) = telegram_token.filter(|t| !t.trim().is_empty()) else {
        return;
    };
    let tg = config
        .channel
        .telegram
        .get_or_insert_with(TelegramConfig::default);
    if tg.bot_token.is_empty() {
        tg.bot_token = token;
    }
}
