//! Decide what an inline-button press means.

use notshop_keyboard::{decode, INERT_PLACEHOLDER};
use std::collections::HashSet;
use tracing::debug;

/// Prefix of payloads attached to catalogue items.
pub const ITEM_PREFIX: &str = "item:";

/// Where a press should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Page indicator or an item without a handler; acknowledge only.
    Inert,
    /// Navigation button for a registered pager.
    Page { target: String, page: usize },
    /// A catalogue item was selected.
    Item(String),
    /// Anything we don't recognise.
    Unhandled,
}

/// Maps callback payloads to routes. Pagers register by token kind.
#[derive(Debug, Clone, Default)]
pub struct ActionRouter {
    kinds: HashSet<String>,
}

impl ActionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept page tokens whose kind is `kind`.
    pub fn register(&mut self, kind: impl Into<String>) -> &mut Self {
        self.kinds.insert(kind.into());
        self
    }

    pub fn route(&self, data: &str) -> Route {
        if data == INERT_PLACEHOLDER {
            return Route::Inert;
        }
        if let Some(id) = data.strip_prefix(ITEM_PREFIX) {
            return if id.is_empty() {
                Route::Unhandled
            } else {
                Route::Item(id.to_string())
            };
        }

        match decode(data) {
            Ok(token) if token.is_inert() => Route::Inert,
            Ok(token) if self.kinds.contains(&token.kind) => Route::Page {
                target: token.kind,
                page: token.page,
            },
            Ok(token) => {
                debug!("no pager registered for '{}'", token.kind);
                Route::Unhandled
            }
            Err(e) => {
                debug!("callback payload is not a page token: {e}");
                Route::Unhandled
            }
        }
    }
}
