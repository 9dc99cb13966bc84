//! Long-polling update loop and Channel trait implementation.

use super::types::{TgResponse, TgUpdate, TgUser};
use super::TelegramChannel;
use async_trait::async_trait;
use notshop_core::{
    error::NotshopError,
    message::{ActionPress, IncomingEvent, IncomingMessage, InlineKeyboard, OutgoingMessage},
    traits::Channel,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingEvent>, NotshopError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let allowed_users = self.config.allowed_users.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!(
                    "{base_url}/getUpdates?timeout=30&allowed_updates=%5B%22message%22%2C%22callback_query%22%5D"
                );
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(std::time::Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let update_id = update.update_id;
                    let Some(event) = convert_update(update, &allowed_users) else {
                        debug!("telegram: skipped update {update_id}");
                        continue;
                    };

                    if tx.send(event).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), NotshopError> {
        let chat_id_str = message
            .reply_target
            .as_deref()
            .ok_or_else(|| NotshopError::Channel("no reply_target on outgoing message".into()))?;

        let chat_id = parse_chat_id(chat_id_str)?;
        self.send_text(chat_id, &message.text, message.keyboard.as_ref())
            .await
    }

    async fn edit_keyboard(
        &self,
        target: &str,
        message_id: i64,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), NotshopError> {
        let chat_id = parse_chat_id(target)?;
        self.edit_message(chat_id, message_id, text, keyboard).await
    }

    async fn answer_action(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), NotshopError> {
        self.answer_callback(callback_id, text).await
    }

    async fn stop(&self) -> Result<(), NotshopError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

fn parse_chat_id(target: &str) -> Result<i64, NotshopError> {
    target
        .parse()
        .map_err(|e| NotshopError::Channel(format!("invalid telegram chat_id '{target}': {e}")))
}

/// Display name for a Telegram user: `@username`, full name, or first name.
fn sender_name(user: &TgUser) -> String {
    if let Some(ref un) = user.username {
        format!("@{un}")
    } else if let Some(ref ln) = user.last_name {
        format!("{} {ln}", user.first_name)
    } else {
        user.first_name.clone()
    }
}

/// Turn a raw update into an event, or `None` when it should be ignored.
///
/// Text messages become [`IncomingEvent::Message`]; button presses with a
/// payload become [`IncomingEvent::Action`]. Users outside a non-empty
/// `allowed_users` list are dropped.
pub(crate) fn convert_update(update: TgUpdate, allowed_users: &[i64]) -> Option<IncomingEvent> {
    let allowed = |user: &TgUser| {
        let ok = allowed_users.is_empty() || allowed_users.contains(&user.id);
        if !ok {
            warn!("ignoring update from unauthorized user {}", user.id);
        }
        ok
    };

    if let Some(query) = update.callback_query {
        if !allowed(&query.from) {
            return None;
        }
        let data = query.data?;
        let (reply_target, message_id) = match query.message {
            Some(ref m) => (Some(m.chat.id.to_string()), Some(m.message_id)),
            None => (None, None),
        };
        return Some(IncomingEvent::Action(ActionPress {
            id: Uuid::new_v4(),
            channel: "telegram".to_string(),
            callback_id: query.id,
            sender_id: query.from.id.to_string(),
            sender_name: Some(sender_name(&query.from)),
            language_code: query.from.language_code.clone(),
            data,
            reply_target,
            message_id,
            timestamp: chrono::Utc::now(),
        }));
    }

    let msg = update.message?;
    let text = msg.text?;
    let user = msg.from?;
    if !allowed(&user) {
        return None;
    }

    Some(IncomingEvent::Message(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        sender_name: Some(sender_name(&user)),
        language_code: user.language_code.clone(),
        text,
        timestamp: chrono::Utc::now(),
        reply_target: Some(msg.chat.id.to_string()),
    }))
}
