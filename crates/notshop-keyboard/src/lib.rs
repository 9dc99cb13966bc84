//! # notshop-keyboard
//!
//! Paginated inline keyboards: control items, a single-use layout builder
//! that slices items into pages and rows, and the compact action tokens
//! carried by the navigation buttons.

pub mod builder;
pub mod item;
pub mod layout;
pub mod page;
pub mod token;

pub use builder::{KeyboardBuilder, CURRENT_PAGE_KEY, NEXT_KEY, PREV_KEY};
pub use item::{ControlItem, ItemInput};
pub use layout::{LayoutRequest, PaginationBinding};
pub use page::{clamp_page, page_window, total_pages, PageContext};
pub use token::{decode, encode, ActionToken, INERT_KIND, INERT_PLACEHOLDER};

/// A finished keyboard: ordered rows of rendered buttons.
pub type Grid = notshop_core::message::InlineKeyboard;
