//! `/menu`: the configured catalogue as a paginated inline keyboard.

use crate::i18n::Lang;
use notshop_core::{config::MenuConfig, error::NotshopError, message::OutgoingMessage};
use notshop_keyboard::{KeyboardBuilder, LayoutRequest, PaginationBinding};

/// Token kind for the catalogue's page buttons.
pub const MENU_ACTION: &str = "menu";

/// Render `page` of the catalogue (clamped into range).
pub fn render_menu(
    menu: &MenuConfig,
    lang: Lang<'_>,
    page: usize,
) -> Result<OutgoingMessage, NotshopError> {
    if menu.items.is_empty() {
        return Ok(OutgoingMessage {
            text: lang.t("menu.empty"),
            ..Default::default()
        });
    }

    let mut builder = KeyboardBuilder::new(lang.translations(), lang.locale());
    builder.add_items(menu.items.iter().cloned())?;

    let request = LayoutRequest {
        shape: menu.shape.clone(),
        default_row_width: menu.row_width,
        items_per_page: Some(menu.items_per_page),
        current_page: page,
        pagination: Some(PaginationBinding::new(MENU_ACTION)),
    };
    let keyboard = builder.build(&request)?;

    Ok(OutgoingMessage {
        text: lang.t("menu.title"),
        reply_target: None,
        keyboard: Some(keyboard),
    })
}
