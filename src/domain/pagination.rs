pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fixed-size, 1-based paging over an already filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Items on `page`. Pages outside `1..=total_pages` are empty.
    pub fn page_slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(items.len());
        let end = page.saturating_mul(self.page_size).min(items.len());
        if page == 0 || start >= end {
            return &[];
        }
        &items[start..end]
    }

    /// Pulls `page` back into range after the list shrank.
    pub fn clamp_page(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len).max(1))
    }

    /// 1-based position of the first row on `page`, for "showing x-y of n".
    pub fn first_row(&self, page: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (page.saturating_sub(1) * self.page_size + 1).min(len)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_items_make_three_pages() {
        let items: Vec<u32> = (0..23).collect();
        let paging = Pagination::default();

        assert_eq!(paging.total_pages(items.len()), 3);
        assert_eq!(paging.page_slice(&items, 1).len(), 10);
        assert_eq!(paging.page_slice(&items, 2).len(), 10);
        assert_eq!(paging.page_slice(&items, 3), &[20, 21, 22]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        let paging = Pagination::new(10);

        assert!(paging.page_slice(&items, 0).is_empty());
        assert!(paging.page_slice(&items, 2).is_empty());
        assert!(paging.page_slice(&items, usize::MAX).is_empty());
    }

    #[test]
    fn clamp_page_pulls_back_into_range() {
        let paging = Pagination::new(10);

        assert_eq!(paging.clamp_page(4, 23), 3);
        assert_eq!(paging.clamp_page(0, 23), 1);
        assert_eq!(paging.clamp_page(3, 0), 1);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let paging = Pagination::new(0);
        assert_eq!(paging.total_pages(4), 4);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let paging = Pagination::default();
        assert_eq!(paging.total_pages(0), 0);
        assert_eq!(paging.first_row(1, 0), 0);
        assert_eq!(paging.first_row(2, 23), 11);
    }
}
