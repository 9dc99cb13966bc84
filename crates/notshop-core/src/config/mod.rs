mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::NotshopError;
use defaults::*;

/// Environment variable consulted when `bot_token` is empty.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level notshop configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notshop: NotshopConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotshopConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for the daily-rotated log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for NotshopConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
        }
    }
}

/// Translation files location and fallback locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Directory holding one `<locale>.json` file per language.
    #[serde(default = "default_locale_dir")]
    pub dir: String,
    /// Locale used when the user's language has no translation.
    #[serde(default = "default_base_locale")]
    pub base: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            dir: default_locale_dir(),
            base: default_base_locale(),
        }
    }
}

/// Catalogue shown by `/menu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Loosely-typed button records: `{ text, action?, link?, ... }`.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_row_width")]
    pub row_width: usize,
    /// Explicit row widths for each page; overrides `row_width`.
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            items_per_page: default_items_per_page(),
            row_width: default_row_width(),
            shape: None,
        }
    }
}

impl Config {
    /// Fill an empty Telegram token from the environment.
    fn apply_env(&mut self) {
        let Ok(token) = std::env::var(BOT_TOKEN_ENV) else {
            return;
        };
        if token.is_empty() {
            return;
        }
        let tg = self.channel.telegram.get_or_insert_with(|| TelegramConfig {
            enabled: true,
            ..Default::default()
        });
        if tg.bot_token.is_empty() {
            tg.bot_token = token;
        }
    }
}

/// Parse configuration from TOML text (no environment overrides).
pub fn parse(content: &str) -> Result<Config, NotshopError> {
    toml::from_str(content).map_err(|e| NotshopError::Config(format!("failed to parse config: {e}")))
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, NotshopError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NotshopError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    config.apply_env();
    Ok(config)
}
