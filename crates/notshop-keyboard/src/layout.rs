//! Build request shape and row arrangement.

use notshop_core::{error::NotshopError, message::InlineButton};
use serde::{Deserialize, Serialize};

use crate::token::validate_kind;

/// Namespace for the "go to page N" tokens of one keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationBinding {
    #[serde(default)]
    pub action_prefix: String,
}

impl PaginationBinding {
    pub fn new(action_prefix: impl Into<String>) -> Self {
        Self {
            action_prefix: action_prefix.into(),
        }
    }

    /// The prefix, or a config error when it is missing or unusable.
    pub(crate) fn prefix(&self) -> Result<&str, NotshopError> {
        if self.action_prefix.is_empty() {
            return Err(NotshopError::Config(
                "pagination binding is missing 'action_prefix'".into(),
            ));
        }
        validate_kind(&self.action_prefix)
            .map_err(|e| NotshopError::Config(format!("pagination binding: {e}")))?;
        Ok(&self.action_prefix)
    }
}

/// Arguments to [`KeyboardBuilder::build`](crate::KeyboardBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Explicit row widths for the current page's buttons.
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
    /// Row width when `shape` is absent. `0` puts each button on its own row.
    #[serde(default = "default_row_width")]
    pub default_row_width: usize,
    /// Page size over the full item list. `None` or `0` disables paging.
    #[serde(default)]
    pub items_per_page: Option<usize>,
    /// Requested page, clamped into range at build time.
    #[serde(default = "default_current_page")]
    pub current_page: usize,
    #[serde(default)]
    pub pagination: Option<PaginationBinding>,
}

fn default_row_width() -> usize {
    1
}

fn default_current_page() -> usize {
    1
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            shape: None,
            default_row_width: default_row_width(),
            items_per_page: None,
            current_page: default_current_page(),
            pagination: None,
        }
    }
}

impl LayoutRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: impl Into<Vec<usize>>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn row_width(mut self, width: usize) -> Self {
        self.default_row_width = width;
        self
    }

    pub fn per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    pub fn paginate(mut self, action_prefix: impl Into<String>) -> Self {
        self.pagination = Some(PaginationBinding::new(action_prefix));
        self
    }
}

/// Arrange one page of buttons into rows.
///
/// With a shape, entries are consumed left to right until buttons run out;
/// leftover entries yield no rows and leftover buttons are dropped. An
/// empty shape counts as no shape.
pub(crate) fn arrange(
    buttons: Vec<InlineButton>,
    shape: Option<&[usize]>,
    row_width: usize,
) -> Vec<Vec<InlineButton>> {
    let mut rows = Vec::new();
    let mut remaining = buttons.into_iter().peekable();

    match shape {
        Some(shape) if !shape.is_empty() => {
            for &width in shape {
                if remaining.peek().is_none() {
                    break;
                }
                let row: Vec<_> = remaining.by_ref().take(width).collect();
                if !row.is_empty() {
                    rows.push(row);
                }
            }
        }
        _ if row_width > 0 => {
            while remaining.peek().is_some() {
                rows.push(remaining.by_ref().take(row_width).collect());
            }
        }
        _ => rows.extend(remaining.map(|button| vec![button])),
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(n: usize) -> Vec<InlineButton> {
        (1..=n)
            .map(|i| InlineButton::callback(format!("b{i}"), format!("item:{i}")))
            .collect()
    }

    fn widths(rows: &[Vec<InlineButton>]) -> Vec<usize> {
        rows.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_shape_drops_unconsumed_buttons() {
        let rows = arrange(buttons(5), Some(&[2, 2][..]), 1);
        assert_eq!(widths(&rows), vec![2, 2]);
        assert_eq!(rows[1][1].text, "b4");
    }

    #[test]
    fn test_shape_tail_without_buttons_yields_no_rows() {
        let rows = arrange(buttons(3), Some(&[2, 2, 2][..]), 1);
        assert_eq!(widths(&rows), vec![2, 1]);
    }

    #[test]
    fn test_zero_width_shape_entry_skipped() {
        let rows = arrange(buttons(3), Some(&[0, 3][..]), 1);
        assert_eq!(widths(&rows), vec![3]);
    }

    #[test]
    fn test_fixed_row_width() {
        let rows = arrange(buttons(5), None, 2);
        assert_eq!(widths(&rows), vec![2, 2, 1]);
    }

    #[test]
    fn test_zero_row_width_is_single_column() {
        let rows = arrange(buttons(3), None, 0);
        assert_eq!(widths(&rows), vec![1, 1, 1]);
    }

    #[test]
    fn test_empty_shape_falls_back_to_row_width() {
        let rows = arrange(buttons(4), Some(&[][..]), 3);
        assert_eq!(widths(&rows), vec![3, 1]);
    }

    #[test]
    fn test_no_buttons_no_rows() {
        assert!(arrange(Vec::new(), None, 2).is_empty());
        assert!(arrange(Vec::new(), Some(&[1][..]), 2).is_empty());
    }

    #[test]
    fn test_binding_prefix_validation() {
        assert_eq!(PaginationBinding::new("menu").prefix().unwrap(), "menu");
        assert!(matches!(
            PaginationBinding::default().prefix(),
            Err(NotshopError::Config(_))
        ));
        assert!(matches!(
            PaginationBinding::new("a:b").prefix(),
            Err(NotshopError::Config(_))
        ));
    }

    #[test]
    fn test_request_from_json_defaults() {
        let req: LayoutRequest = serde_json::from_str(r#"{"items_per_page": 3}"#).unwrap();
        assert_eq!(req.default_row_width, 1);
        assert_eq!(req.current_page, 1);
        assert_eq!(req.items_per_page, Some(3));

        let req: LayoutRequest = serde_json::from_str(r#"{"pagination": {}}"#).unwrap();
        assert_eq!(req.pagination, Some(PaginationBinding::default()));
    }
}
