use serde::Serialize;

use crate::MAX_PAGE_SIZE;

/// A clamped, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Clamps raw caller input: `page >= 1`, `1 <= size <= max_size`.
    ///
    /// `max_size` is itself capped at [`MAX_PAGE_SIZE`].
    pub fn clamped(page: i64, size: i64, max_size: u32) -> Self {
        let max_size = i64::from(max_size.clamp(1, MAX_PAGE_SIZE));
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let size = u32::try_from(size.clamp(1, max_size)).unwrap_or(MAX_PAGE_SIZE);
        Self { page, size }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip: `(page - 1) * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self { items, total, page: request.page(), size: request.size() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_size() {
        let req = PageRequest::clamped(0, 500, 100);
        assert_eq!(req.page(), 1);
        assert_eq!(req.size(), 100);

        let req = PageRequest::clamped(-3, 0, 100);
        assert_eq!(req.page(), 1);
        assert_eq!(req.size(), 1);
    }

    #[test]
    fn configured_max_cannot_exceed_hard_cap() {
        let req = PageRequest::clamped(1, 1000, 500);
        assert_eq!(req.size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_page_minus_one_times_size() {
        assert_eq!(PageRequest::clamped(1, 50, 100).offset(), 0);
        assert_eq!(PageRequest::clamped(3, 50, 100).offset(), 100);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let req = PageRequest::clamped(i64::MAX, 100, 100);
        assert_eq!(req.page(), u32::MAX);
        assert!(req.offset() > 0);
    }
}
