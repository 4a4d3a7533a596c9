//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, input normalization, and the
//! `Page` envelope returned by paginated listings.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane values: page 0 becomes 1, per_page stays in 1..=100.
    pub fn normalize(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        Self { page, per_page }
    }

    fn offset(self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of a filtered listing. `total` is the filtered count, not the
/// page count. Wire keys are camelCase.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Slice an already-filtered, order-preserved collection. Out-of-range
    /// pages produce empty `items`, never an error.
    pub fn from_vec(all: Vec<T>, pagination: Pagination) -> Self {
        let p = pagination.normalize();
        let total = all.len();
        let items = all
            .into_iter()
            .skip(p.offset())
            .take(p.per_page as usize)
            .collect();
        Self { items, total, page: p.page, page_size: p.per_page }
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let p = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let p = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(p.page, 5);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn from_vec_slices_second_page() {
        let page = Page::from_vec((0..25).collect(), Pagination { page: 2, per_page: 10 });
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn from_vec_out_of_range_page_is_empty() {
        let page = Page::from_vec(vec![1, 2, 3], Pagination { page: 9, per_page: 10 });
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }
}
