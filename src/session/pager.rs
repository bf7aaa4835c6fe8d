//! Page arithmetic.

use crate::models::PAGE_SIZE;

/// Number of pages needed to show `total_found` records, `PAGE_SIZE` per page
pub fn total_pages(total_found: u64) -> u32 {
    let pages = total_found.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pager position derived from the current page and the result total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn new(page: u32, total_found: u64) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages(total_found),
        }
    }

    /// Previous is disabled on the first page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled on the last page, and when there are no pages at all
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Clamp a requested page into `[1, total_pages]`
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(20), 1);
        assert_eq!(total_pages(21), 2);
        assert_eq!(total_pages(45), 3);
    }

    #[test]
    fn test_boundaries() {
        let first = Pager::new(1, 45);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Pager::new(3, 45);
        assert!(last.has_prev());
        assert!(!last.has_next());

        let empty = Pager::new(1, 0);
        assert!(!empty.has_prev());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_clamp() {
        let pager = Pager::new(2, 45);
        assert_eq!(pager.clamp(0), 1);
        assert_eq!(pager.clamp(2), 2);
        assert_eq!(pager.clamp(99), 3);
        assert_eq!(Pager::new(1, 0).clamp(5), 1);
    }
}
