//! Gateway: the main event loop connecting channels to commands and pagers.
//!
//! Text messages go through the command table; button presses go through
//! the [`ActionRouter`]. Every press is acknowledged exactly once so the
//! client stops its loading spinner.

mod routing;

#[cfg(test)]
mod tests;

pub use routing::{ActionRouter, Route};

use crate::commands::{self, render_menu, Command, CommandContext, MENU_ACTION};
use crate::i18n::{Lang, Translations};
use notshop_core::{
    config::MenuConfig,
    message::{ActionPress, IncomingEvent, IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use notshop_keyboard::ControlItem;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The central gateway that routes events between channels and handlers.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) translations: Arc<Translations>,
    pub(super) menu: MenuConfig,
    pub(super) router: ActionRouter,
}

impl Gateway {
    /// Create a new gateway with the catalogue pager registered.
    pub fn new(
        channels: HashMap<String, Arc<dyn Channel>>,
        translations: Arc<Translations>,
        menu: MenuConfig,
    ) -> Self {
        let mut router = ActionRouter::new();
        router.register(MENU_ACTION);
        Self {
            channels,
            translations,
            menu,
            router,
        }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "notshop gateway running | channels: {} | locales: {} | menu items: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.translations.locales().join(", "),
            self.menu.items.len(),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingEvent>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(event) = channel_rx.recv().await {
                    if tx.send(event).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        loop {
            tokio::select! {
                maybe = rx.recv() => {
                    let Some(event) = maybe else {
                        warn!("all channels closed");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.dispatch(event).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Route one event to its handler.
    pub(super) async fn dispatch(&self, event: IncomingEvent) {
        let locale = self.translations.resolve_locale(event.language_code());
        let Some(channel) = self.channels.get(event.channel()).cloned() else {
            warn!("event from unknown channel '{}'", event.channel());
            return;
        };
        let lang = Lang::new(&self.translations, &locale);

        match event {
            IncomingEvent::Message(msg) => self.handle_message(channel.as_ref(), lang, msg).await,
            IncomingEvent::Action(press) => self.handle_action(channel.as_ref(), lang, press).await,
        }
    }

    async fn handle_message(&self, channel: &dyn Channel, lang: Lang<'_>, msg: IncomingMessage) {
        let ctx = CommandContext {
            sender_name: msg.sender_name.as_deref(),
            lang,
            menu: &self.menu,
        };
        let mut reply = match Command::parse(&msg.text) {
            Some(cmd) => {
                info!("[{}] command {cmd:?} from {}", msg.channel, msg.sender_id);
                commands::handle(cmd, &ctx)
            }
            None => {
                debug!("[{}] non-command text from {}", msg.channel, msg.sender_id);
                commands::handle(Command::Help, &ctx)
            }
        };
        reply.reply_target = msg.reply_target;

        if let Err(e) = channel.send(reply).await {
            error!("failed to send reply: {e}");
        }
    }

    async fn handle_action(&self, channel: &dyn Channel, lang: Lang<'_>, press: ActionPress) {
        let toast = match self.router.route(&press.data) {
            Route::Inert => None,
            Route::Page { target, page } => {
                self.turn_page(channel, lang, &press, &target, page).await
            }
            Route::Item(id) => {
                info!("[{}] {} selected item {id}", press.channel, press.sender_id);
                let item = self.item_label(&press.data).unwrap_or(id);
                Some(lang.tf("menu.item_selected", &[("item", item)]))
            }
            Route::Unhandled => {
                warn!(
                    "[{}] unhandled action '{}' from {}",
                    press.channel, press.data, press.sender_id
                );
                None
            }
        };

        if let Err(e) = channel.answer_action(&press.callback_id, toast.as_deref()).await {
            warn!("failed to acknowledge action {}: {e}", press.callback_id);
        }
    }

    /// Re-render a pager in place. Returns a toast when the page can't be shown.
    async fn turn_page(
        &self,
        channel: &dyn Channel,
        lang: Lang<'_>,
        press: &ActionPress,
        target: &str,
        page: usize,
    ) -> Option<String> {
        if target != MENU_ACTION {
            warn!("no renderer for pager '{target}'");
            return None;
        }

        let mut rendered = match render_menu(&self.menu, lang, page) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("failed to render menu page {page}: {e}");
                return Some(lang.t("menu.unavailable"));
            }
        };

        let Some(chat) = press.reply_target.as_deref() else {
            warn!("action {} has no chat to reply to", press.callback_id);
            return None;
        };

        let result = match (press.message_id, rendered.keyboard.take()) {
            (Some(message_id), Some(keyboard)) => {
                channel
                    .edit_keyboard(chat, message_id, &rendered.text, &keyboard)
                    .await
            }
            (_, keyboard) => {
                rendered.keyboard = keyboard;
                rendered.reply_target = Some(chat.to_string());
                channel.send(rendered).await
            }
        };

        match result {
            Ok(()) => None,
            Err(e) => {
                error!("failed to show menu page {page}: {e}");
                Some(lang.t("menu.unavailable"))
            }
        }
    }

    /// Display text of the catalogue item carrying `payload`.
    fn item_label(&self, payload: &str) -> Option<String> {
        self.menu
            .items
            .iter()
            .filter_map(|record| ControlItem::from_record(record.clone()).ok())
            .find(|item| item.action_payload() == Some(payload))
            .map(|item| item.text().to_string())
    }

    async fn shutdown(&self) {
        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }
        info!("notshop gateway stopped");
    }
}
