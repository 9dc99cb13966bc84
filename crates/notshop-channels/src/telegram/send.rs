//! Outbound Bot API calls: messages, keyboard edits, press acknowledgements.

use super::TelegramChannel;
use notshop_core::{error::NotshopError, message::InlineKeyboard};
use tracing::{debug, info, warn};

/// Telegram's hard limit on message text, in bytes.
const MAX_MESSAGE_LEN: usize = 4096;

impl TelegramChannel {
    /// Register the bot's command list shown in the Telegram client.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Start the bot" },
                { "command": "menu", "description": "Browse the catalogue" },
                { "command": "help", "description": "Show available commands" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }

    /// Send a text message, attaching `keyboard` to the last chunk.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), NotshopError> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);

        for (idx, chunk) in chunks.into_iter().enumerate() {
            let markup = if idx == last { keyboard } else { None };
            let url = format!("{}/sendMessage", self.base_url);
            let mut body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
                "parse_mode": "HTML",
            });
            if let Some(kb) = markup {
                body["reply_markup"] = serde_json::to_value(kb)?;
            }

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| NotshopError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                if error_text.contains("can't parse entities") {
                    debug!("HTML parse failed, retrying as plain text");
                    if let Some(obj) = body.as_object_mut() {
                        obj.remove("parse_mode");
                    }
                    self.client
                        .post(&url)
                        .json(&body)
                        .send()
                        .await
                        .map_err(|e| {
                            NotshopError::Channel(format!("telegram send (plain) failed: {e}"))
                        })?;
                } else {
                    warn!("telegram send got {status}: {error_text}");
                }
            }
        }

        Ok(())
    }

    /// Replace text and keyboard of an existing message.
    pub(crate) async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), NotshopError> {
        let url = format!("{}/editMessageText", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
            "parse_mode": "HTML",
            "reply_markup": keyboard,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotshopError::Channel(format!("telegram edit failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            // Re-rendering the page already shown is harmless.
            if error_text.contains("message is not modified") {
                debug!("telegram edit skipped: message not modified");
            } else {
                return Err(NotshopError::Channel(format!(
                    "telegram edit got {status}: {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub(crate) async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), NotshopError> {
        let url = format!("{}/answerCallbackQuery", self.base_url);
        let mut body = serde_json::json!({ "callback_query_id": callback_id });
        if let Some(text) = text {
            body["text"] = serde_json::Value::String(text.to_string());
        }

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotshopError::Channel(format!("telegram answerCallbackQuery failed: {e}")))?;

        Ok(())
    }
}

/// Split text into chunks of at most `max_len` bytes, preferring newline breaks.
pub(crate) fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}
