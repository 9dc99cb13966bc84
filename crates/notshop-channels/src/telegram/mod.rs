//! Telegram Bot API channel for a keyboard-driven shop.
//!
//! Besides text messages, the poll loop subscribes to `callback_query`
//! updates so inline-button presses reach the gateway as action events.
//! Menus are sent with `reply_markup` on the last chunk, page turns rewrite
//! the same message through `editMessageText`, and each press is closed with
//! `answerCallbackQuery`.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
pub(crate) mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use notshop_core::config::TelegramConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Long-polling Bot API client that delivers messages and button presses.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
    base_url: String,
    /// Highest `update_id` seen; the next poll asks for the one after it.
    last_update_id: Arc<Mutex<Option<i64>>>,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: TelegramConfig) -> Self {
        let base_url = format!("https://api.telegram.org/bot{}", config.bot_token);
        Self {
            config,
            client: reqwest::Client::new(),
            base_url,
            last_update_id: Arc::new(Mutex::new(None)),
        }
    }
}
