//! In-memory pagination with a truthful page descriptor.

use serde::Serialize;

/// Pagination metadata returned alongside list data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

/// Slice `items` down to the requested page.
///
/// `page` and `limit` below 1 clamp to 1. A page past the end yields an
/// empty slice while the descriptor keeps the true `total` and `pages`.
/// `pages` is at least 1 even for empty input.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let pages = total.div_ceil(limit).max(1);
    let start = (page - 1).saturating_mul(limit);
    let data = if start >= total {
        Vec::new()
    } else {
        items[start..(start + limit).min(total)].to_vec()
    };
    (data, Pagination { page, limit, total, pages })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_the_requested_page() {
        let items: Vec<i32> = (1..=10).collect();
        let (data, meta) = paginate(&items, 2, 3);
        assert_eq!(data, vec![4, 5, 6]);
        assert_eq!(meta, Pagination { page: 2, limit: 3, total: 10, pages: 4 });
    }

    #[test]
    fn pages_rounds_up() {
        let items: Vec<i32> = (1..=7).collect();
        let (_, meta) = paginate(&items, 1, 3);
        assert_eq!(meta.pages, 3);
    }

    #[test]
    fn clamps_page_and_limit_to_one() {
        let items = vec![1, 2, 3];
        let (data, meta) = paginate(&items, 0, 0);
        assert_eq!(data, vec![1]);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.limit, 1);
    }

    #[test]
    fn page_past_the_end_is_empty_but_truthful() {
        let items = vec![1, 2, 3];
        let (data, meta) = paginate(&items, 9, 2);
        assert!(data.is_empty());
        assert_eq!(meta.total, 3);
        assert_eq!(meta.pages, 2);
    }

    #[test]
    fn extreme_limits_do_not_overflow() {
        let items = vec![1, 2, 3];
        let (data, meta) = paginate(&items, 1, usize::MAX);
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(meta.pages, 1);

        let (data, meta) = paginate(&items, usize::MAX, usize::MAX);
        assert!(data.is_empty());
        assert_eq!(meta.total, 3);
        assert_eq!(meta.pages, 1);
    }

    #[test]
    fn empty_input_reports_one_page() {
        let items: Vec<i32> = Vec::new();
        let (data, meta) = paginate(&items, 1, 10);
        assert!(data.is_empty());
        assert_eq!(meta, Pagination { page: 1, limit: 10, total: 0, pages: 1 });
    }

    #[test]
    fn concatenating_all_pages_reconstructs_the_input() {
        let items: Vec<i32> = (1..=23).collect();
        let (_, meta) = paginate(&items, 1, 5);
        let mut rebuilt = Vec::new();
        for page in 1..=meta.pages {
            let (data, _) = paginate(&items, page, 5);
            rebuilt.extend(data);
        }
        assert_eq!(rebuilt, items);
    }
}
