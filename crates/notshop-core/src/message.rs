use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An incoming text message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific user ID.
    pub sender_id: String,
    /// Human-readable sender name (username or first name).
    pub sender_name: Option<String>,
    /// IETF language tag reported by the platform (e.g. "en", "ru").
    #[serde(default)]
    pub language_code: Option<String>,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Platform-specific target for routing the response (e.g. Telegram chat_id).
    #[serde(default)]
    pub reply_target: Option<String>,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPress {
    pub id: Uuid,
    pub channel: String,
    /// Platform ID of the press, used to acknowledge it.
    pub callback_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    /// Action payload attached to the pressed button.
    pub data: String,
    /// Chat that holds the keyboard message.
    #[serde(default)]
    pub reply_target: Option<String>,
    /// Message that carries the keyboard, for in-place edits.
    #[serde(default)]
    pub message_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// Anything a channel can deliver to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomingEvent {
    Message(IncomingMessage),
    Action(ActionPress),
}

impl IncomingEvent {
    /// Channel the event arrived on.
    pub fn channel(&self) -> &str {
        match self {
            Self::Message(m) => &m.channel,
            Self::Action(a) => &a.channel,
        }
    }

    pub fn sender_id(&self) -> &str {
        match self {
            Self::Message(m) => &m.sender_id,
            Self::Action(a) => &a.sender_id,
        }
    }

    pub fn language_code(&self) -> Option<&str> {
        match self {
            Self::Message(m) => m.language_code.as_deref(),
            Self::Action(a) => a.language_code.as_deref(),
        }
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    #[serde(default)]
    pub reply_target: Option<String>,
    /// Inline keyboard attached below the message.
    #[serde(default)]
    pub keyboard: Option<InlineKeyboard>,
}

/// One renderable button, shaped like the Bot API's `InlineKeyboardButton`.
///
/// Exactly one of `callback_data` / `url` is set. Platform decorations
/// (e.g. `pay`, `login_url`) ride along in `extra` and are flattened into
/// the serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InlineButton {
    /// A button that sends `data` back when pressed.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// A finished grid of buttons: ordered rows of ordered buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn rows(&self) -> &[Vec<InlineButton>] {
        &self.inline_keyboard
    }

    pub fn is_empty(&self) -> bool {
        self.inline_keyboard.is_empty()
    }

    /// Total number of buttons across all rows.
    pub fn button_count(&self) -> usize {
        self.inline_keyboard.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_serializes_like_bot_api() {
        let mut button = InlineButton::callback("Next", "pg:menu:2");
        button
            .extra
            .insert("pay".to_string(), serde_json::Value::Bool(true));
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Next", "callback_data": "pg:menu:2", "pay": true})
        );
    }

    #[test]
    fn test_keyboard_button_count() {
        let kb = InlineKeyboard {
            inline_keyboard: vec![
                vec![InlineButton::callback("a", "1"), InlineButton::callback("b", "2")],
                vec![InlineButton::callback("c", "3")],
            ],
        };
        assert_eq!(kb.button_count(), 3);
        assert!(!kb.is_empty());
        assert!(InlineKeyboard::default().is_empty());
    }
}
