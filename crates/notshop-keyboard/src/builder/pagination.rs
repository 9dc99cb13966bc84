//! Previous / indicator / next row for a paginated keyboard.

use notshop_core::{error::NotshopError, message::InlineButton, traits::Localizer};
use tracing::warn;

use crate::page::PageContext;
use crate::token::{self, INERT_KIND, INERT_PLACEHOLDER};

/// Translation key for the "previous page" label.
pub const PREV_KEY: &str = "buttons.pagination.prev";
/// Translation key for the "next page" label.
pub const NEXT_KEY: &str = "buttons.pagination.next";
/// Translation key for the "page X of Y" label; receives `current_page` and `total_pages`.
pub const CURRENT_PAGE_KEY: &str = "buttons.pagination.current_page";

/// Build the navigation row for `ctx`, in the order previous, indicator, next.
///
/// Previous and next tokens encode `(action_prefix, page ± 1)`. The indicator
/// carries an inert token and falls back to [`INERT_PLACEHOLDER`] rather than
/// failing the row.
pub(crate) fn pagination_row(
    ctx: PageContext,
    action_prefix: &str,
    localizer: &dyn Localizer,
    locale: &str,
) -> Result<Vec<InlineButton>, NotshopError> {
    let mut row = Vec::with_capacity(3);

    if ctx.has_previous() {
        let data = token::encode(action_prefix, ctx.page - 1)?;
        row.push(InlineButton::callback(
            localizer.resolve(PREV_KEY, locale, &[]),
            data,
        ));
    }

    let indicator_data = token::encode(INERT_KIND, ctx.page).unwrap_or_else(|e| {
        warn!("pagination indicator token failed, using placeholder: {e}");
        INERT_PLACEHOLDER.to_string()
    });
    let indicator_label = localizer.resolve(
        CURRENT_PAGE_KEY,
        locale,
        &[
            ("current_page", ctx.page.to_string()),
            ("total_pages", ctx.total.to_string()),
        ],
    );
    row.push(InlineButton::callback(indicator_label, indicator_data));

    if ctx.has_next() {
        let data = token::encode(action_prefix, ctx.page + 1)?;
        row.push(InlineButton::callback(
            localizer.resolve(NEXT_KEY, locale, &[]),
            data,
        ));
    }

    Ok(row)
}
