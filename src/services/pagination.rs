// src/services/pagination.rs - page metadata and the page-number window for listing links

use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<u32>,
    pub next_num: Option<u32>,
}

impl Pagination {
    /// `page` and `per_page` are clamped to at least 1. A page past the end is kept
    /// as-is; it simply has no items.
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let pages = u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX);
        let has_prev = page > 1;
        let has_next = page < pages;

        Self {
            page,
            per_page,
            total,
            pages,
            has_prev,
            has_next,
            prev_num: has_prev.then(|| page - 1),
            next_num: has_next.then(|| page + 1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Page numbers to render as links. `None` marks a gap (ellipsis).
    ///
    /// Shows `left_edge` pages at the start, `left_current`/`right_current` around
    /// the current page and `right_edge` at the end.
    pub fn iter_pages(
        &self,
        left_edge: u32,
        left_current: u32,
        right_current: u32,
        right_edge: u32,
    ) -> Vec<Option<u32>> {
        let mut out = Vec::new();
        let pages_end = self.pages.saturating_add(1);
        if pages_end == 1 {
            return out;
        }

        let left_end = (1 + left_edge).min(pages_end);
        out.extend((1..left_end).map(Some));
        if left_end == pages_end {
            return out;
        }

        let mid_start = left_end.max(self.page.saturating_sub(left_current));
        let mid_end = self
            .page
            .saturating_add(right_current)
            .saturating_add(1)
            .min(pages_end);
        if mid_start > left_end {
            out.push(None);
        }
        out.extend((mid_start..mid_end).map(Some));
        if mid_end == pages_end {
            return out;
        }

        let right_start = mid_end.max(pages_end.saturating_sub(right_edge));
        if right_start > mid_end {
            out.push(None);
        }
        out.extend((right_start..pages_end).map(Some));
        out
    }

    pub fn window(&self) -> Vec<Option<u32>> {
        self.iter_pages(2, 2, 4, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_has_no_pages() {
        let p = Pagination::new(1, 5, 0);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
        assert!(p.window().is_empty());
    }

    #[test]
    fn metadata_for_middle_page() {
        let p = Pagination::new(2, 5, 12);
        assert_eq!(p.pages, 3);
        assert_eq!(p.offset(), 5);
        assert_eq!(p.prev_num, Some(1));
        assert_eq!(p.next_num, Some(3));
    }

    #[test]
    fn page_past_end_keeps_number() {
        let p = Pagination::new(9, 5, 12);
        assert_eq!(p.page, 9);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn zero_page_clamps_to_first() {
        let p = Pagination::new(0, 5, 12);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn small_window_lists_every_page() {
        let p = Pagination::new(1, 5, 20);
        assert_eq!(p.window(), vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn window_with_gaps_on_both_sides() {
        let p = Pagination::new(10, 1, 20);
        assert_eq!(
            p.window(),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn window_near_start_has_one_gap() {
        let p = Pagination::new(1, 1, 20);
        assert_eq!(
            p.window(),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(19), Some(20)]
        );
    }
}
