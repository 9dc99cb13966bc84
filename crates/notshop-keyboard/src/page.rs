//! Pure pagination math.

/// Number of pages needed for `item_count` items, `per_page` at a time.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Current page and page count for one rendered keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// 1-based page being shown, always within `1..=total`.
    pub page: usize,
    pub total: usize,
}

impl PageContext {
    /// Derive the context for `item_count` items, clamping `requested`.
    ///
    /// `per_page` of `None` or `0`, or an empty list, means a single page.
    pub fn new(item_count: usize, per_page: Option<usize>, requested: usize) -> Self {
        match per_page {
            Some(per_page) if per_page > 0 && item_count > 0 => {
                let total = total_pages(item_count, per_page);
                Self {
                    page: clamp_page(requested, total),
                    total,
                }
            }
            _ => Self::single(),
        }
    }

    pub fn single() -> Self {
        Self { page: 1, total: 1 }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total
    }

    pub fn is_paginated(&self) -> bool {
        self.total > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(10, 3), 4);
        assert_eq!(total_pages(9, 3), 3);
        assert_eq!(total_pages(0, 3), 0);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_last_page_window() {
        assert_eq!(page_window(10, 3, 4), (9, 10));
        assert_eq!(page_window(10, 3, 1), (0, 3));
        assert_eq!(page_window(10, 3, 9), (10, 10));
    }

    #[test]
    fn test_context_clamps() {
        assert_eq!(PageContext::new(10, Some(3), 0).page, 1);
        assert_eq!(PageContext::new(10, Some(3), 99).page, 4);
        assert_eq!(PageContext::new(10, Some(3), 2), PageContext { page: 2, total: 4 });
    }

    #[test]
    fn test_context_without_pagination() {
        assert_eq!(PageContext::new(10, None, 3), PageContext::single());
        assert_eq!(PageContext::new(10, Some(0), 3), PageContext::single());
        assert_eq!(PageContext::new(0, Some(3), 3), PageContext::single());
        assert!(!PageContext::single().is_paginated());
    }

    #[test]
    fn test_neighbours() {
        let first = PageContext { page: 1, total: 3 };
        assert!(!first.has_previous());
        assert!(first.has_next());
        let last = PageContext { page: 3, total: 3 };
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}
