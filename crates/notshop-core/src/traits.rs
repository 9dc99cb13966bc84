use crate::{
    error::NotshopError,
    message::{IncomingEvent, InlineKeyboard, OutgoingMessage},
};
use async_trait::async_trait;

/// Localized text lookup.
///
/// Implementations own the fallback policy (base locale, raw key on miss);
/// callers only rely on getting a string back.
pub trait Localizer: Send + Sync {
    /// Resolve `key` for `locale`, substituting `{name}` placeholders from `params`.
    fn resolve(&self, key: &str, locale: &str, params: &[(&str, String)]) -> String;
}

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to receive events and
/// send messages with inline keyboards.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages and button presses.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingEvent>, NotshopError>;

    /// Send a message (and its keyboard, if any) through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), NotshopError>;

    /// Replace the text and keyboard of a message that was already sent.
    async fn edit_keyboard(
        &self,
        target: &str,
        message_id: i64,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), NotshopError>;

    /// Acknowledge a button press, optionally with a short toast.
    async fn answer_action(
        &self,
        _callback_id: &str,
        _text: Option<&str>,
    ) -> Result<(), NotshopError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), NotshopError>;
}
