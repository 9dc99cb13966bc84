//! Single-use keyboard builder.
//!
//! Items are accumulated with [`KeyboardBuilder::add_item`] and friends, then
//! [`KeyboardBuilder::build`] slices out the requested page, lays it into
//! rows, appends the navigation row when there is more than one page, and
//! empties the builder.

mod pagination;


pub use pagination::{CURRENT_PAGE_KEY, NEXT_KEY, PREV_KEY};

use notshop_core::{
    error::NotshopError,
    message::{InlineButton, InlineKeyboard},
    traits::Localizer,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::item::{ControlItem, ItemInput};
use crate::layout::{arrange, LayoutRequest};
use crate::page::{page_window, PageContext};

/// Accumulates control items and turns them into one keyboard page.
///
/// Not meant to be shared between callers: every `build` consumes the
/// pending items.
pub struct KeyboardBuilder<'a> {
    items: Vec<ControlItem>,
    localizer: &'a dyn Localizer,
    locale: String,
}

impl std::fmt::Debug for KeyboardBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardBuilder")
            .field("items", &self.items)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl<'a> KeyboardBuilder<'a> {
    /// Create a builder whose navigation labels are resolved in `locale`.
    pub fn new(localizer: &'a dyn Localizer, locale: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            localizer,
            locale: locale.into(),
        }
    }

    /// Append one item.
    pub fn add_item(
        &mut self,
        text: impl Into<String>,
        action: Option<&str>,
        link: Option<&str>,
        extra: Option<Map<String, Value>>,
    ) -> Result<&mut Self, NotshopError> {
        let mut item = ControlItem::new(text)?;
        if let Some(action) = action {
            item = item.with_action(action)?;
        }
        if let Some(link) = link {
            item = item.with_link(link);
        }
        for (key, value) in extra.into_iter().flatten() {
            item = item.with_extra(key, value)?;
        }
        self.items.push(item);
        Ok(self)
    }

    /// Append a button that sends `action` back when pressed.
    pub fn add_action(
        &mut self,
        text: impl Into<String>,
        action: &str,
    ) -> Result<&mut Self, NotshopError> {
        self.add_item(text, Some(action), None, None)
    }

    /// Append a button that opens `url`.
    pub fn add_link(&mut self, text: impl Into<String>, url: &str) -> Result<&mut Self, NotshopError> {
        self.add_item(text, None, Some(url), None)
    }

    /// Append an already validated item.
    pub fn push(&mut self, item: ControlItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Append many items or loose records.
    ///
    /// Every input is validated before any is appended, so a bad record
    /// leaves the builder untouched.
    pub fn add_items<I, T>(&mut self, inputs: I) -> Result<&mut Self, NotshopError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemInput>,
    {
        let items = inputs
            .into_iter()
            .enumerate()
            .map(|(idx, input)| {
                input.into().into_item().map_err(|e| match e {
                    NotshopError::Validation(msg) => {
                        NotshopError::Validation(format!("item #{idx}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.items.extend(items);
        Ok(self)
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the keyboard for `request` and clear the pending items.
    ///
    /// On error nothing is returned and the pending items are kept.
    pub fn build(&mut self, request: &LayoutRequest) -> Result<InlineKeyboard, NotshopError> {
        let ctx = PageContext::new(
            self.items.len(),
            request.items_per_page,
            request.current_page,
        );

        let page_items = match request.items_per_page {
            Some(per_page) if ctx.is_paginated() => {
                let (start, end) = page_window(self.items.len(), per_page, ctx.page);
                &self.items[start..end]
            }
            _ => &self.items[..],
        };

        let buttons: Vec<InlineButton> = page_items.iter().map(ControlItem::to_button).collect();
        let mut rows = arrange(
            buttons,
            request.shape.as_deref(),
            request.default_row_width,
        );

        // Single-page keyboards never grow a navigation row.
        if let Some(binding) = request.pagination.as_ref().filter(|_| ctx.is_paginated()) {
            let prefix = binding.prefix()?;
            let nav = pagination::pagination_row(ctx, prefix, self.localizer, &self.locale)?;
            if nav.is_empty() {
                return Err(NotshopError::Config(format!(
                    "pagination produced no controls for page {} of {}",
                    ctx.page, ctx.total
                )));
            }
            rows.push(nav);
        }

        debug!(
            "built keyboard: {} items, page {}/{}, {} rows",
            self.items.len(),
            ctx.page,
            ctx.total,
            rows.len()
        );

        self.items.clear();
        Ok(InlineKeyboard {
            inline_keyboard: rows,
        })
    }
}
