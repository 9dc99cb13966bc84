//! Built-in bot commands with instant responses.

mod menu;


pub use menu::{render_menu, MENU_ACTION};

use crate::i18n::Lang;
use notshop_core::{config::MenuConfig, message::OutgoingMessage};
use tracing::error;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub sender_name: Option<&'a str>,
    pub lang: Lang<'a>,
    pub menu: &'a MenuConfig,
}

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Menu,
}

impl Command {
    /// Parse a command from message text. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/menu@notshop_bot" → "/menu").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/menu" | "/catalog" => Some(Self::Menu),
            _ => None,
        }
    }
}

/// Handle a command and return the reply (without a routing target).
pub fn handle(cmd: Command, ctx: &CommandContext<'_>) -> OutgoingMessage {
    match cmd {
        Command::Start => {
            let name = ctx
                .sender_name
                .map(|n| n.trim_start_matches('@'))
                .unwrap_or_default()
                .to_string();
            text_reply(ctx.lang.tf("welcome", &[("name", name)]))
        }
        Command::Help => text_reply(ctx.lang.t("help")),
        Command::Menu => render_menu(ctx.menu, ctx.lang, 1).unwrap_or_else(|e| {
            error!("failed to build menu keyboard: {e}");
            text_reply(ctx.lang.t("menu.empty"))
        }),
    }
}

fn text_reply(text: String) -> OutgoingMessage {
    OutgoingMessage {
        text,
        ..Default::default()
    }
}
